//! # Mock Store & Testing Guide
//!
//! [`MockItemStore`] implements [`ItemStore`] entirely in memory from a queue of scripted
//! expectations. It lets coordinator tests inject store failures and hold a call open
//! while they inspect the optimistic state.
//!
//! ## When to use the mock vs a real backend
//!
//! | Feature | MockItemStore | HTTP / local backend |
//! |---------|---------------|----------------------|
//! | **Determinism** | Fully scripted | Depends on the server or file |
//! | **Error Injection** | `return_err` | Needs a failing server |
//! | **In-flight inspection** | `respond_later` | Timing dependent |
//! | **Use Case** | Coordinator logic | Wire format and persistence |
//!
//! ## Example
//!
//! ```rust
//! use inventory_core::mock::MockItemStore;
//! use inventory_core::{InventoryActor, MutationOutcome};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockItemStore::new();
//!     mock.expect_list().return_ok(vec![]);
//!
//!     let (actor, client) = InventoryActor::new(8);
//!     tokio::spawn(actor.run(Arc::new(mock.clone())));
//!
//!     client.reload().await.unwrap();
//!     // Buying an unknown item never reaches the store.
//!     assert_eq!(client.buy_item("missing").await.unwrap(), MutationOutcome::Skipped);
//!     mock.verify();
//! }
//! ```
//!
//! Calls that arrive with no matching expectation fail with a transport error and are
//! reported by [`MockItemStore::verify`].

use crate::model::{InventoryItem, ItemPatch};
use crate::store::{ItemStore, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// A store call as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Create(InventoryItem),
    Replace(InventoryItem),
    Patch(String, ItemPatch),
    Delete(String),
}

/// Scripted reply for one expected call.
enum Reply<T> {
    Now(Result<T, StoreError>),
    Later(oneshot::Receiver<Result<T, StoreError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, StoreError> {
        match self {
            Reply::Now(result) => result,
            Reply::Later(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(StoreError::Transport("mock responder dropped".into()))),
        }
    }
}

enum Expectation {
    List(Reply<Vec<InventoryItem>>),
    Create(Reply<InventoryItem>),
    Replace(Reply<InventoryItem>),
    Patch(Reply<Option<InventoryItem>>),
    Delete(Reply<()>),
}

impl Expectation {
    fn name(&self) -> &'static str {
        match self {
            Expectation::List(_) => "list",
            Expectation::Create(_) => "create",
            Expectation::Replace(_) => "replace",
            Expectation::Patch(_) => "patch",
            Expectation::Delete(_) => "delete",
        }
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<StoreCall>,
    mismatches: Vec<String>,
}

/// In-memory [`ItemStore`] driven by expectations.
///
/// Clones share the same expectation queue and call log, so a test can keep one handle
/// and give another to the coordinator.
#[derive(Clone, Default)]
pub struct MockItemStore {
    state: Arc<Mutex<MockState>>,
}

impl MockItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list(&self) -> ExpectationBuilder<Vec<InventoryItem>> {
        ExpectationBuilder::new(self.state.clone(), Expectation::List)
    }

    pub fn expect_create(&self) -> ExpectationBuilder<InventoryItem> {
        ExpectationBuilder::new(self.state.clone(), Expectation::Create)
    }

    pub fn expect_replace(&self) -> ExpectationBuilder<InventoryItem> {
        ExpectationBuilder::new(self.state.clone(), Expectation::Replace)
    }

    pub fn expect_patch(&self) -> ExpectationBuilder<Option<InventoryItem>> {
        ExpectationBuilder::new(self.state.clone(), Expectation::Patch)
    }

    pub fn expect_delete(&self) -> ExpectationBuilder<()> {
        ExpectationBuilder::new(self.state.clone(), Expectation::Delete)
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Panics if an expectation is left over or a call was unexpected.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Unexpected store calls: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn next(&self, call: StoreCall) -> Option<Expectation> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.expectations.pop_front()
    }

    fn mismatch<T>(&self, got: &str, expected: Option<&Expectation>) -> Result<T, StoreError> {
        let message = match expected {
            Some(e) => format!("got {} while expecting {}", got, e.name()),
            None => format!("got {} with no expectation left", got),
        };
        self.state.lock().unwrap().mismatches.push(message.clone());
        Err(StoreError::Transport(message))
    }
}

#[async_trait]
impl ItemStore for MockItemStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        match self.next(StoreCall::List) {
            Some(Expectation::List(reply)) => reply.resolve().await,
            other => self.mismatch("list", other.as_ref()),
        }
    }

    async fn create(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        match self.next(StoreCall::Create(item.clone())) {
            Some(Expectation::Create(reply)) => reply.resolve().await,
            other => self.mismatch("create", other.as_ref()),
        }
    }

    async fn replace(&self, item: &InventoryItem) -> Result<InventoryItem, StoreError> {
        match self.next(StoreCall::Replace(item.clone())) {
            Some(Expectation::Replace(reply)) => reply.resolve().await,
            other => self.mismatch("replace", other.as_ref()),
        }
    }

    async fn patch(&self, id: &str, patch: &ItemPatch) -> Result<Option<InventoryItem>, StoreError> {
        match self.next(StoreCall::Patch(id.to_string(), patch.clone())) {
            Some(Expectation::Patch(reply)) => reply.resolve().await,
            other => self.mismatch("patch", other.as_ref()),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self.next(StoreCall::Delete(id.to_string())) {
            Some(Expectation::Delete(reply)) => reply.resolve().await,
            other => self.mismatch("delete", other.as_ref()),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T> {
    state: Arc<Mutex<MockState>>,
    wrap: fn(Reply<T>) -> Expectation,
}

impl<T> ExpectationBuilder<T> {
    fn new(state: Arc<Mutex<MockState>>, wrap: fn(Reply<T>) -> Expectation) -> Self {
        Self { state, wrap }
    }

    fn push(self, reply: Reply<T>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back((self.wrap)(reply));
    }

    /// The call succeeds with `value`.
    pub fn return_ok(self, value: T) {
        self.push(Reply::Now(Ok(value)));
    }

    /// The call fails with `error`.
    pub fn return_err(self, error: StoreError) {
        self.push(Reply::Now(Err(error)));
    }

    /// The call stays pending until the returned sender is used (or dropped, which fails it).
    pub fn respond_later(self) -> oneshot::Sender<Result<T, StoreError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Later(receiver));
        sender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, VehicleType};

    fn item(id: &str) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: "Pedal".into(),
            vehicle_type: VehicleType::Bicycle,
            section: Section::Drivetrain,
            price: 3000.0,
            quantity: 4,
            description: String::new(),
            image: None,
            min_stock_threshold: 2,
        }
    }

    #[tokio::test]
    async fn scripted_replies_are_returned_in_order() {
        let mock = MockItemStore::new();
        mock.expect_create().return_ok(item("1"));
        mock.expect_delete().return_err(StoreError::Status(503));

        let created = mock.create(&item("1")).await.unwrap();
        assert_eq!(created.id, "1");
        assert!(matches!(mock.delete("1").await, Err(StoreError::Status(503))));

        assert_eq!(
            mock.calls(),
            vec![StoreCall::Create(item("1")), StoreCall::Delete("1".into())]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn deferred_reply_waits_for_responder() {
        let mock = MockItemStore::new();
        let responder = mock.expect_list().respond_later();

        let pending = tokio::spawn({
            let mock = mock.clone();
            async move { mock.list().await }
        });
        responder.send(Ok(vec![item("9")])).unwrap();

        let items = pending.await.unwrap().unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected store calls")]
    async fn unexpected_call_is_reported() {
        let mock = MockItemStore::new();
        assert!(mock.patch("1", &ItemPatch::quantity(1)).await.is_err());
        mock.verify();
    }
}
