//! # Item Store Contract
//!
//! The coordinator talks to the remote collection through [`ItemStore`]. Implementations
//! hold nothing beyond their endpoint configuration and make exactly one attempt per call;
//! retrying and reconciling is the caller's business.

use crate::model::{InventoryItem, ItemPatch};
use async_trait::async_trait;

/// Why a store call failed.
///
/// The coordinator treats every variant the same way (the store is unreachable); the
/// variants exist so logs say what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Store responded with status {0}")]
    Status(u16),
    #[error("Malformed store response: {0}")]
    Decode(String),
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// Remote collection of inventory items.
///
/// Mirrors the REST resource: list, create, replace by id, partial update by id and
/// delete by id.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Fetches the whole collection.
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError>;

    /// Stores a new item and returns the stored representation, or `item` itself when
    /// the store acknowledges without echoing one.
    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError>;

    /// Replaces the item with `item.id`. Falls back to `item` like [`create`](Self::create).
    async fn replace(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError>;

    /// Updates the fields present in `patch`. `None` when the store acknowledged the
    /// change without returning the item.
    async fn patch(&self, id: &str, patch: &ItemPatch) -> Result<Option<InventoryItem>, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
