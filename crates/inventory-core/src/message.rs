//! # Coordinator Messages
//!
//! Requests sent from [`InventoryClient`](crate::InventoryClient) to
//! [`InventoryActor`](crate::InventoryActor), plus the result types they resolve to.

use crate::model::{InventoryItem, ItemDraft};
use crate::store::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel for a request.
pub type Response<T> = oneshot::Sender<T>;

/// How a mutating operation ended once its remote call was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store accepted the change.
    Confirmed,
    /// The store rejected an add; the provisional item was removed again.
    RolledBack,
    /// The store rejected the change but it stays applied locally.
    Diverged,
    /// Nothing to do (unknown id, empty stock, no pending delete); no remote call made.
    Skipped,
}

/// Result of [`InventoryClient::add_item`](crate::InventoryClient::add_item).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Final id of the item: the store's id when it assigned a different one.
    pub id: String,
    pub outcome: MutationOutcome,
}

/// Result of a full collection reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Loaded { count: usize },
    Unreachable,
}

/// Point-in-time copy of the coordinator state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub unreachable: bool,
    pub loading: bool,
    pub pending_delete: Option<String>,
}

/// Requests understood by the coordinator.
#[derive(Debug)]
pub enum InventoryRequest {
    Snapshot {
        respond_to: Response<InventorySnapshot>,
    },
    Get {
        id: String,
        respond_to: Response<Option<InventoryItem>>,
    },
    Reload {
        respond_to: Response<ReloadOutcome>,
    },
    Add {
        draft: ItemDraft,
        respond_to: Response<AddOutcome>,
    },
    Update {
        item: InventoryItem,
        respond_to: Response<MutationOutcome>,
    },
    RequestDelete {
        id: String,
        respond_to: Response<()>,
    },
    CancelDelete {
        respond_to: Response<()>,
    },
    ConfirmDelete {
        respond_to: Response<MutationOutcome>,
    },
    Buy {
        id: String,
        respond_to: Response<MutationOutcome>,
    },
    DismissError {
        respond_to: Response<()>,
    },
}

/// Completion report of a remote call, fed back into the coordinator loop.
#[derive(Debug)]
pub(crate) enum Settlement {
    Listed {
        result: Result<Vec<InventoryItem>, StoreError>,
        respond_to: Response<ReloadOutcome>,
    },
    Created {
        provisional_id: String,
        result: Result<InventoryItem, StoreError>,
        respond_to: Response<AddOutcome>,
    },
    /// Replace, patch or delete; none of them roll back.
    Mutated {
        operation: &'static str,
        id: String,
        result: Result<(), StoreError>,
        respond_to: Response<MutationOutcome>,
    },
}
