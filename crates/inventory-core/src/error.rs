//! # Coordinator Errors
//!
//! Store failures never reach callers of the coordinator; they are folded into the
//! `unreachable` flag. What can still fail is talking to the coordinator task itself.

/// Errors raised by [`InventoryClient`](crate::InventoryClient) calls.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Inventory coordinator closed")]
    ActorClosed,
    #[error("Inventory coordinator dropped response channel")]
    ActorDropped,
}
