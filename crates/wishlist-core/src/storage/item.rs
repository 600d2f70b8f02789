//! Typed item storage wrapper.

use crate::models::Item;
use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use redb::Database;
use std::sync::Arc;

/// Typed item storage wrapper around wishlist-storage::ItemStorage.
#[derive(Debug, Clone)]
pub struct ItemStorage {
    inner: wishlist_storage::ItemStorage,
}

impl ItemStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: wishlist_storage::ItemStorage::new(db)?,
        })
    }

    /// Get an item by key
    pub fn get(&self, key: &str) -> Result<Option<Item>> {
        match self.inner.get_raw(key)? {
            Some(bytes) => Ok(Some(decode(key, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Insert a new item. Returns false if the key is already taken.
    pub fn insert(&self, item: &Item) -> Result<bool> {
        let json = serde_json::to_vec(item)?;
        self.inner.insert_new_raw(&item.key, &json)
    }

    /// Overwrite an existing item. Returns false if the key is missing.
    pub fn update(&self, item: &Item) -> Result<bool> {
        let json = serde_json::to_vec(item)?;
        self.inner.replace_raw(&item.key, &json)
    }

    /// Delete an item. Returns false if the key is missing.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key)
    }

    /// List all items in key order
    pub fn list(&self) -> Result<Vec<Item>> {
        self.inner
            .list_raw()?
            .into_iter()
            .map(|(key, bytes)| decode(&key, &bytes))
            .collect()
    }

    /// List items whose owned flag matches
    pub fn list_by_owned(&self, owned: bool) -> Result<Vec<Item>> {
        let mut items = self.list()?;
        items.retain(|item| item.owned == owned);
        Ok(items)
    }

    /// Pick one item uniformly at random, optionally restricted by owned flag
    pub fn choose_random(&self, owned: Option<bool>) -> Result<Option<Item>> {
        let candidates = match owned {
            Some(owned) => self.list_by_owned(owned)?,
            None => self.list()?,
        };
        Ok(candidates.choose(&mut rand::thread_rng()).cloned())
    }
}

fn decode(key: &str, bytes: &[u8]) -> Result<Item> {
    serde_json::from_slice(bytes).with_context(|| format!("Corrupt item record '{}'", key))
}
