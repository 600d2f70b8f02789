//! Wishlist Storage - Low-level storage layer
//!
//! This crate provides the persistence layer for the wishlist, using redb as
//! the embedded database. It exposes byte-level APIs; typed wrappers over the
//! wishlist models live in the wishlist-core crate.
//!
//! # Tables
//!
//! - `wishlist_items` - Wishlist items keyed by item key

pub mod item;
mod simple_storage;

pub use item::ItemStorage;
pub use simple_storage::SimpleStorage;
