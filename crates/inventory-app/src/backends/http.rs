//! REST backend over `{base_url}/items`.

use async_trait::async_trait;
use inventory_core::{InventoryItem, ItemPatch, ItemStore, StoreError};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// [`ItemStore`] backed by a JSON REST service.
///
/// One attempt per call. No timeout unless one is configured.
#[derive(Debug, Clone)]
pub struct HttpItemStore {
    client: Client,
    base_url: String,
}

impl HttpItemStore {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, id)
    }
}

fn transport(error: reqwest::Error) -> StoreError {
    StoreError::Transport(error.to_string())
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json::<T>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Body of a successful write. The status alone decides success; an empty or
/// unrecognised body yields `None`.
async fn echoed_item(response: Response) -> Result<Option<InventoryItem>, StoreError> {
    let body = response.bytes().await.map_err(transport)?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice(&body) {
        Ok(item) => Ok(Some(item)),
        Err(e) => {
            debug!(error = %e, "Ignoring unrecognised response body");
            Ok(None)
        }
    }
}

#[async_trait]
impl ItemStore for HttpItemStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        let items: Vec<InventoryItem> = decode(check_status(response)?).await?;
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(item)
            .send()
            .await
            .map_err(transport)?;
        let stored = echoed_item(check_status(response)?).await?;
        Ok(stored.unwrap_or_else(|| item.clone()))
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn replace(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        let response = self
            .client
            .put(self.item_url(&item.id))
            .json(item)
            .send()
            .await
            .map_err(transport)?;
        let stored = echoed_item(check_status(response)?).await?;
        Ok(stored.unwrap_or_else(|| item.clone()))
    }

    #[instrument(skip(self, patch))]
    async fn patch(&self, id: &str, patch: &ItemPatch) -> Result<Option<InventoryItem>, StoreError> {
        let response = self
            .client
            .patch(self.item_url(id))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        echoed_item(check_status(response)?).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?;
        Ok(())
    }
}
