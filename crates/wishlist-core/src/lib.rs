pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::WishlistError;
pub use models::*;

use services::ItemService;
use std::path::Path;
use std::sync::Arc;
use storage::Storage;
use tracing::info;

/// Core application state shared by the API and the pages.
///
/// Built once at startup and handed to the server; nothing here is global.
pub struct AppCore {
    pub storage: Arc<Storage>,
    pub items: ItemService,
}

impl AppCore {
    pub fn new(db_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db_path = db_path.as_ref();
        let storage = Arc::new(Storage::new(db_path)?);
        let items = ItemService::new(storage.items.clone());

        info!(path = %db_path.display(), items = storage.items.list()?.len(), "Wishlist storage ready");

        Ok(Self { storage, items })
    }
}
