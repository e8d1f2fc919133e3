//! # Inventory Client
//!
//! Cheap, cloneable handle to the [`InventoryActor`](crate::InventoryActor). Every method
//! sends one request over the coordinator channel and waits for the reply on a oneshot.

use crate::error::InventoryError;
use crate::message::{
    AddOutcome, InventoryRequest, InventorySnapshot, MutationOutcome, ReloadOutcome, Response,
};
use crate::model::{InventoryItem, ItemDraft};
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// Type-safe async API over the coordinator.
///
/// Mutating calls resolve after the store round trip has been reconciled, but the local
/// change is already visible to [`snapshot`](Self::snapshot) while the call is in flight.
#[derive(Clone, Debug)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    async fn call<T>(
        &self,
        build: impl FnOnce(Response<T>) -> InventoryRequest,
    ) -> Result<T, InventoryError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| InventoryError::ActorClosed)?;
        response.await.map_err(|_| InventoryError::ActorDropped)
    }

    pub async fn snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        self.call(|respond_to| InventoryRequest::Snapshot { respond_to }).await
    }

    pub async fn items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        Ok(self.snapshot().await?.items)
    }

    pub async fn get(&self, id: impl Into<String>) -> Result<Option<InventoryItem>, InventoryError> {
        let id = id.into();
        self.call(|respond_to| InventoryRequest::Get { id, respond_to }).await
    }

    /// Replaces the local collection with the store's. Raises the loading flag meanwhile.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<ReloadOutcome, InventoryError> {
        tracing::debug!("Sending request");
        self.call(|respond_to| InventoryRequest::Reload { respond_to }).await
    }

    /// Prepends the item under a provisional id, then creates it in the store.
    /// A failed create removes the item again.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_item(&self, draft: ItemDraft) -> Result<AddOutcome, InventoryError> {
        tracing::debug!(?draft, "Sending request");
        self.call(|respond_to| InventoryRequest::Add { draft, respond_to }).await
    }

    /// Replaces the item with the same id, then replaces it in the store.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn update_item(&self, item: InventoryItem) -> Result<MutationOutcome, InventoryError> {
        tracing::debug!(?item, "Sending request");
        self.call(|respond_to| InventoryRequest::Update { item, respond_to }).await
    }

    /// Marks `id` for deletion; nothing is removed until [`confirm_delete`](Self::confirm_delete).
    pub async fn request_delete(&self, id: impl Into<String>) -> Result<(), InventoryError> {
        let id = id.into();
        self.call(|respond_to| InventoryRequest::RequestDelete { id, respond_to }).await
    }

    /// Id awaiting delete confirmation, if any.
    pub async fn pending_delete(&self) -> Result<Option<String>, InventoryError> {
        Ok(self.snapshot().await?.pending_delete)
    }

    pub async fn cancel_delete(&self) -> Result<(), InventoryError> {
        self.call(|respond_to| InventoryRequest::CancelDelete { respond_to }).await
    }

    /// Removes the pending item locally, then deletes it in the store.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&self) -> Result<MutationOutcome, InventoryError> {
        tracing::debug!("Sending request");
        self.call(|respond_to| InventoryRequest::ConfirmDelete { respond_to }).await
    }

    /// Takes one unit out of stock. A no-op when the item has none left.
    #[instrument(skip(self))]
    pub async fn buy_item(&self, id: &str) -> Result<MutationOutcome, InventoryError> {
        tracing::debug!("Sending request");
        let id = id.to_string();
        self.call(|respond_to| InventoryRequest::Buy { id, respond_to }).await
    }

    /// Clears the unreachable flag without reloading.
    pub async fn dismiss_error(&self) -> Result<(), InventoryError> {
        self.call(|respond_to| InventoryRequest::DismissError { respond_to }).await
    }
}
