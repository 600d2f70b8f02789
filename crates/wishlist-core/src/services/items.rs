//! Item service - the state transitions of a wishlist item.

use crate::error::{Result, WishlistError, validate_key};
use crate::models::{Item, ItemPatch, ItemSpec};
use crate::storage::ItemStorage;
use tracing::{debug, info};

/// Item operations over an injected item store.
#[derive(Debug, Clone)]
pub struct ItemService {
    items: ItemStorage,
}

impl ItemService {
    pub fn new(items: ItemStorage) -> Self {
        Self { items }
    }

    /// Get an item by key
    pub fn get(&self, key: &str) -> Result<Item> {
        self.items
            .get(key)?
            .ok_or_else(|| WishlistError::item_not_found(key))
    }

    /// List every item; an empty wishlist is reported as `NotFound`
    pub fn list(&self) -> Result<Vec<Item>> {
        let items = self.items.list()?;
        if items.is_empty() {
            return Err(WishlistError::NotFound("The wishlist is empty".to_string()));
        }
        Ok(items)
    }

    /// Split the wishlist into (wanted, owned)
    pub fn partition(&self) -> Result<(Vec<Item>, Vec<Item>)> {
        let items = self.items.list()?;
        Ok(items.into_iter().partition(|item| !item.owned))
    }

    /// Create a new item (fails if the key already exists)
    pub fn create(&self, key: &str, spec: ItemSpec) -> Result<Item> {
        validate_key(key)?;
        if spec.owned == Some(true) {
            debug!(key = %key, "Ignoring owned flag supplied on create");
        }
        let item = Item::new(key, spec);
        if !self.items.insert(&item)? {
            return Err(WishlistError::item_exists(key));
        }
        info!(key = %key, "Item created");
        Ok(item)
    }

    /// Overwrite the supplied fields of an existing item
    pub fn update(&self, key: &str, patch: &ItemPatch) -> Result<Item> {
        let mut item = self.get(key)?;
        if !patch.apply(&mut item) {
            debug!(key = %key, "Update left item unchanged");
            return Ok(item);
        }
        if !self.items.update(&item)? {
            return Err(WishlistError::item_not_found(key));
        }
        info!(key = %key, "Item updated");
        Ok(item)
    }

    /// Flip the owned flag of an existing item
    pub fn toggle_owned(&self, key: &str) -> Result<Item> {
        let mut item = self.get(key)?;
        item.owned = !item.owned;
        if !self.items.update(&item)? {
            return Err(WishlistError::item_not_found(key));
        }
        info!(key = %key, owned = item.owned, "Item ownership toggled");
        Ok(item)
    }

    /// Remove an item
    pub fn delete(&self, key: &str) -> Result<()> {
        if !self.items.delete(key)? {
            return Err(WishlistError::item_not_found(key));
        }
        info!(key = %key, "Item deleted");
        Ok(())
    }

    /// Pick one item that is not owned yet, uniformly at random
    pub fn pick_random_unowned(&self) -> Result<Item> {
        self.items.choose_random(Some(false))?.ok_or_else(|| {
            WishlistError::NotFound("No unowned items left in the wishlist".to_string())
        })
    }
}
