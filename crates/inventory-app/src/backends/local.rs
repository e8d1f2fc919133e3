//! File-backed store: the whole collection as one JSON array on disk.

use async_trait::async_trait;
use inventory_core::{InventoryItem, ItemPatch, ItemStore, StoreError};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// [`ItemStore`] that keeps the collection in a local JSON file.
///
/// A missing file reads as an empty collection. Every call reads and rewrites the file
/// under one async mutex, so concurrent writers never interleave.
#[derive(Debug)]
pub struct LocalItemStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Vec<InventoryItem>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, items: &[InventoryItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json =
            serde_json::to_vec_pretty(items).map_err(|e| StoreError::Decode(e.to_string()))?;
        // Replace the file in one step so an interrupted write leaves the old copy intact.
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), size = items.len(), "Wrote collection");
        Ok(())
    }

    /// Runs `change` on the item with `id` and persists the collection.
    async fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut InventoryItem),
    ) -> Result<InventoryItem, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        change(item);
        let updated = item.clone();
        self.write(&items).await?;
        Ok(updated)
    }
}

#[async_trait]
impl ItemStore for LocalItemStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        items.insert(0, item.clone());
        self.write(&items).await?;
        info!(id = %item.id, size = items.len(), "Stored new item");
        Ok(item.clone())
    }

    async fn replace(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        let replacement = item.clone();
        self.modify(&item.id, |slot| *slot = replacement).await
    }

    async fn patch(&self, id: &str, patch: &ItemPatch) -> Result<Option<InventoryItem>, StoreError> {
        self.modify(id, |item| item.apply(patch)).await.map(Some)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write(&items).await?;
        info!(%id, size = items.len(), "Removed item");
        Ok(())
    }
}
