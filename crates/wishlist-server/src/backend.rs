//! How the pages reach the item service: in-process, or over the JSON API.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use wishlist_core::error::{Result, validate_key};
use wishlist_core::{AppCore, Item, ItemPatch, ItemSpec, WishlistError};

use crate::api::ErrorBody;

#[async_trait]
pub trait WishlistBackend: Send + Sync {
    /// All items split into (wanted, owned)
    async fn partition(&self) -> Result<(Vec<Item>, Vec<Item>)>;
    async fn create(&self, key: &str, spec: ItemSpec) -> Result<Item>;
    async fn update(&self, key: &str, patch: ItemPatch) -> Result<Item>;
    async fn toggle_owned(&self, key: &str) -> Result<Item>;
    async fn delete(&self, key: &str) -> Result<()>;
    async fn pick_random_unowned(&self) -> Result<Item>;
}

/// Calls the item service of this process directly.
pub struct LocalBackend {
    core: Arc<AppCore>,
}

impl LocalBackend {
    pub fn new(core: Arc<AppCore>) -> Self {
        Self { core }
    }
}

#[async_trait]
impl WishlistBackend for LocalBackend {
    async fn partition(&self) -> Result<(Vec<Item>, Vec<Item>)> {
        self.core.items.partition()
    }

    async fn create(&self, key: &str, spec: ItemSpec) -> Result<Item> {
        self.core.items.create(key, spec)
    }

    async fn update(&self, key: &str, patch: ItemPatch) -> Result<Item> {
        self.core.items.update(key, &patch)
    }

    async fn toggle_owned(&self, key: &str) -> Result<Item> {
        self.core.items.toggle_owned(key)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.core.items.delete(key)
    }

    async fn pick_random_unowned(&self) -> Result<Item> {
        self.core.items.pick_random_unowned()
    }
}

/// Calls the wishlist JSON API at a configured base URL.
#[derive(Clone)]
pub struct HttpBackend {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/wishlist/{}", self.base_url, path)
    }

    /// Dot segments are rewritten by URL normalization, so no stored item
    /// can be reached under `.` or `..`.
    fn item_url(&self, key: &str) -> Result<String> {
        if key == "." || key == ".." {
            return Err(WishlistError::item_not_found(key));
        }
        Ok(self.url(&urlencoding::encode(key)))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| WishlistError::Upstream(format!("Failed to reach API: {}", err)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());
        Err(match status {
            StatusCode::NOT_FOUND => WishlistError::NotFound(message),
            StatusCode::CONFLICT => WishlistError::Conflict(message),
            StatusCode::BAD_REQUEST => WishlistError::InvalidKey(message),
            _ => WishlistError::Upstream(format!("API answered {}: {}", status, message)),
        })
    }

    async fn send_for_item(&self, request: RequestBuilder) -> Result<Item> {
        let response = self.send(request).await?;
        response
            .json::<Item>()
            .await
            .map_err(|err| WishlistError::Upstream(format!("Invalid item from API: {}", err)))
    }
}

#[async_trait]
impl WishlistBackend for HttpBackend {
    async fn partition(&self) -> Result<(Vec<Item>, Vec<Item>)> {
        let request = self.http_client.get(self.url(""));
        let items = match self.send(request).await {
            Ok(response) => response.json::<Vec<Item>>().await.map_err(|err| {
                WishlistError::Upstream(format!("Invalid item list from API: {}", err))
            })?,
            // The list route answers 404 for an empty wishlist
            Err(WishlistError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err),
        };
        Ok(items.into_iter().partition(|item| !item.owned))
    }

    async fn create(&self, key: &str, spec: ItemSpec) -> Result<Item> {
        validate_key(key)?;
        let request = self.http_client.put(self.item_url(key)?).json(&spec);
        self.send_for_item(request).await
    }

    async fn update(&self, key: &str, patch: ItemPatch) -> Result<Item> {
        let request = self.http_client.patch(self.item_url(key)?).json(&patch);
        self.send_for_item(request).await
    }

    async fn toggle_owned(&self, key: &str) -> Result<Item> {
        let url = format!("{}/owned/", self.item_url(key)?);
        self.send_for_item(self.http_client.patch(url)).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.send(self.http_client.delete(self.item_url(key)?))
            .await?;
        Ok(())
    }

    async fn pick_random_unowned(&self) -> Result<Item> {
        self.send_for_item(self.http_client.get(self.url("random/")))
            .await
    }
}
