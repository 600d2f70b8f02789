//! Storage layer with typed wrappers around wishlist-storage.
//!
//! This module wraps the byte-level APIs from wishlist-storage with the
//! wishlist models.

pub mod item;

use anyhow::{Context, Result};
use redb::Database;
use std::path::Path;
use std::sync::Arc;

pub use item::ItemStorage;

/// Central storage manager that opens the database and initializes all tables.
pub struct Storage {
    pub items: ItemStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = Arc::new(
            Database::create(path)
                .with_context(|| format!("Failed to open database {}", path.display()))?,
        );

        let items = ItemStorage::new(db)?;

        Ok(Self { items })
    }
}
