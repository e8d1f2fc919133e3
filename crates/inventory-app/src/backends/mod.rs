//! Interchangeable [`ItemStore`](inventory_core::ItemStore) backends.

mod http;
mod local;

pub use http::HttpItemStore;
pub use local::LocalItemStore;

use crate::config::{BackendKind, StoreConfig};
use inventory_core::{ItemStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds the backend selected by `config.backend`.
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    match config.backend {
        BackendKind::Http => {
            info!(base_url = %config.base_url, "Using HTTP store");
            let timeout = config.timeout_secs.map(Duration::from_secs);
            Ok(Arc::new(HttpItemStore::new(config.base_url.clone(), timeout)?))
        }
        BackendKind::Local => {
            info!(path = %config.local_path.display(), "Using local file store");
            Ok(Arc::new(LocalItemStore::new(config.local_path.clone())))
        }
    }
}
