//! Error types for wishlist operations

use thiserror::Error;

/// Failures surfaced by the item service.
///
/// `NotFound` and `Conflict` are expected per-request outcomes; the other
/// variants carry unexpected storage or transport failures.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidKey(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl WishlistError {
    pub fn item_not_found(key: &str) -> Self {
        Self::NotFound(format!("Item '{}' not found", key))
    }

    pub fn item_exists(key: &str) -> Self {
        Self::Conflict(format!("Item '{}' already exists", key))
    }
}

/// Check that a new item key can be addressed as a URL path segment.
///
/// Blank keys and the dot segments `.` and `..` are rejected: URL
/// normalization rewrites the latter before they reach the item routes.
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(WishlistError::InvalidKey(
            "Item key is required".to_string(),
        ));
    }
    if key == "." || key == ".." {
        return Err(WishlistError::InvalidKey(format!(
            "Item key '{}' is reserved",
            key
        )));
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, WishlistError>;
