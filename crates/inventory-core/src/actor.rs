//! # Optimistic Mutation Coordinator
//!
//! [`InventoryActor`] is the single writer of the item collection. It runs in its own
//! Tokio task and processes requests one at a time, so the collection needs no lock.
//!
//! Every mutation follows the same shape:
//!
//! 1. Apply the change to the local collection inside the loop.
//! 2. Spawn the matching store call so the loop keeps serving snapshots meanwhile.
//! 3. The spawned call reports back with a [`Settlement`]; the loop reconciles it and
//!    answers the original caller.
//!
//! Reconciliation is asymmetric. A failed add removes the provisional item
//! again; a failed update, delete or buy stays applied locally. Every failure raises the
//! `unreachable` flag, which only a successful reload (or an explicit dismiss) clears.
//!
//! There is no lock, queue or version check between remote calls: two quick buys on the
//! same item race against the store exactly as the user issued them.

use crate::client::InventoryClient;
use crate::message::{
    AddOutcome, InventoryRequest, InventorySnapshot, MutationOutcome, ReloadOutcome, Response,
    Settlement,
};
use crate::model::{InventoryItem, ItemDraft, ItemPatch};
use crate::store::{ItemStore, StoreError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owner of the in-memory item collection.
///
/// # Usage Pattern
///
/// 1. **Create**: `InventoryActor::new()` returns the actor and its client.
/// 2. **Wire**: pass the store backend into `actor.run(store)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = InventoryActor::new(32);
/// let handle = tokio::spawn(actor.run(store));
/// client.reload().await?;
/// ```
///
/// Dropping every client closes the channel; the loop then waits for in-flight store
/// calls to settle and exits.
pub struct InventoryActor {
    receiver: mpsc::Receiver<InventoryRequest>,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    settle_rx: mpsc::UnboundedReceiver<Settlement>,
    items: Vec<InventoryItem>,
    unreachable: bool,
    pending_delete: Option<String>,
    in_flight: usize,
    /// Loading while any reload is outstanding.
    reloads_in_flight: usize,
    ids: ProvisionalIds,
}

impl InventoryActor {
    /// Creates the actor and the client used to reach it.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            settle_tx,
            settle_rx,
            items: Vec::new(),
            unreachable: false,
            pending_delete: None,
            in_flight: 0,
            reloads_in_flight: 0,
            ids: ProvisionalIds::default(),
        };
        (actor, InventoryClient::new(sender))
    }

    /// Runs the event loop until every client is dropped and no store call is in flight.
    ///
    /// The store is injected here rather than in `new()` so the backend can be chosen
    /// after the client has been handed out.
    pub async fn run(mut self, store: Arc<dyn ItemStore>) {
        info!("Inventory coordinator started");
        let mut open = true;

        loop {
            tokio::select! {
                Some(settlement) = self.settle_rx.recv() => {
                    self.in_flight -= 1;
                    self.settle(settlement);
                }
                request = self.receiver.recv(), if open => match request {
                    Some(request) => self.handle(request, &store),
                    None => open = false,
                },
            }

            if !open && self.in_flight == 0 {
                break;
            }
        }

        info!(size = self.items.len(), "Inventory coordinator shutdown");
    }

    fn handle(&mut self, request: InventoryRequest, store: &Arc<dyn ItemStore>) {
        match request {
            InventoryRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            InventoryRequest::Get { id, respond_to } => {
                let item = self.items.iter().find(|i| i.id == id).cloned();
                debug!(%id, found = item.is_some(), "Get");
                let _ = respond_to.send(item);
            }
            InventoryRequest::Reload { respond_to } => self.reload(store, respond_to),
            InventoryRequest::Add { draft, respond_to } => self.add(draft, store, respond_to),
            InventoryRequest::Update { item, respond_to } => self.update(item, store, respond_to),
            InventoryRequest::RequestDelete { id, respond_to } => {
                debug!(%id, "Delete requested");
                self.pending_delete = Some(id);
                let _ = respond_to.send(());
            }
            InventoryRequest::CancelDelete { respond_to } => {
                if let Some(id) = self.pending_delete.take() {
                    debug!(%id, "Delete cancelled");
                }
                let _ = respond_to.send(());
            }
            InventoryRequest::ConfirmDelete { respond_to } => self.confirm_delete(store, respond_to),
            InventoryRequest::Buy { id, respond_to } => self.buy(id, store, respond_to),
            InventoryRequest::DismissError { respond_to } => {
                self.unreachable = false;
                let _ = respond_to.send(());
            }
        }
    }

    fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.items.clone(),
            unreachable: self.unreachable,
            loading: self.reloads_in_flight > 0,
            pending_delete: self.pending_delete.clone(),
        }
    }

    fn reload(&mut self, store: &Arc<dyn ItemStore>, respond_to: Response<ReloadOutcome>) {
        self.reloads_in_flight += 1;
        self.unreachable = false;
        let store = store.clone();
        self.spawn_call(async move { store.list().await }, move |result| {
            Settlement::Listed { result, respond_to }
        });
    }

    fn add(&mut self, draft: ItemDraft, store: &Arc<dyn ItemStore>, respond_to: Response<AddOutcome>) {
        let provisional_id = self.ids.next();
        let item = InventoryItem::from_draft(provisional_id.clone(), draft);
        self.items.insert(0, item.clone());
        info!(id = %provisional_id, size = self.items.len(), "Added (provisional)");

        let store = store.clone();
        self.spawn_call(async move { store.create(&item).await }, move |result| {
            Settlement::Created {
                provisional_id,
                result,
                respond_to,
            }
        });
    }

    fn update(&mut self, item: InventoryItem, store: &Arc<dyn ItemStore>, respond_to: Response<MutationOutcome>) {
        let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) else {
            warn!(id = %item.id, "Update of unknown item skipped");
            let _ = respond_to.send(MutationOutcome::Skipped);
            return;
        };
        *slot = item.clone();
        info!(id = %item.id, "Updated");

        let id = item.id.clone();
        let store = store.clone();
        self.spawn_call(async move { store.replace(&item).await.map(drop) }, move |result| {
            Settlement::Mutated {
                operation: "replace",
                id,
                result,
                respond_to,
            }
        });
    }

    fn confirm_delete(&mut self, store: &Arc<dyn ItemStore>, respond_to: Response<MutationOutcome>) {
        let Some(id) = self.pending_delete.take() else {
            let _ = respond_to.send(MutationOutcome::Skipped);
            return;
        };
        self.items.retain(|i| i.id != id);
        info!(%id, size = self.items.len(), "Deleted");

        let store = store.clone();
        let call_id = id.clone();
        self.spawn_call(async move { store.delete(&call_id).await }, move |result| {
            Settlement::Mutated {
                operation: "delete",
                id,
                result,
                respond_to,
            }
        });
    }

    fn buy(&mut self, id: String, store: &Arc<dyn ItemStore>, respond_to: Response<MutationOutcome>) {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id && i.quantity > 0) else {
            debug!(%id, "Buy skipped: unknown item or no stock");
            let _ = respond_to.send(MutationOutcome::Skipped);
            return;
        };
        item.quantity -= 1;
        let patch = ItemPatch::quantity(item.quantity);
        info!(%id, quantity = item.quantity, "Sold one");

        let store = store.clone();
        let call_id = id.clone();
        self.spawn_call(
            async move { store.patch(&call_id, &patch).await.map(drop) },
            move |result| Settlement::Mutated {
                operation: "patch",
                id,
                result,
                respond_to,
            },
        );
    }

    /// Runs `call` in its own task and feeds its result back through `settle`.
    ///
    /// A call that panics still settles, as a transport error, so `in_flight` always
    /// returns to zero.
    fn spawn_call<T, F, S>(&mut self, call: F, settle: S)
    where
        T: Send + 'static,
        F: Future<Output = Result<T, StoreError>> + Send + 'static,
        S: FnOnce(Result<T, StoreError>) -> Settlement + Send + 'static,
    {
        self.in_flight += 1;
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(call).await {
                Ok(result) => result,
                Err(e) => Err(StoreError::Transport(format!("store call aborted: {}", e))),
            };
            let _ = settle_tx.send(settle(result));
        });
    }

    fn settle(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Listed { result, respond_to } => {
                self.reloads_in_flight -= 1;
                let outcome = match result {
                    Ok(items) => {
                        self.items = items;
                        self.unreachable = false;
                        info!(size = self.items.len(), "Reloaded");
                        ReloadOutcome::Loaded {
                            count: self.items.len(),
                        }
                    }
                    Err(e) => {
                        self.mark_unreachable("list", None, &e);
                        ReloadOutcome::Unreachable
                    }
                };
                let _ = respond_to.send(outcome);
            }
            Settlement::Created {
                provisional_id,
                result,
                respond_to,
            } => {
                let outcome = match result {
                    Ok(stored) => {
                        let id = self.adopt_store_id(&provisional_id, stored.id);
                        AddOutcome {
                            id,
                            outcome: MutationOutcome::Confirmed,
                        }
                    }
                    Err(e) => {
                        self.items.retain(|i| i.id != provisional_id);
                        self.mark_unreachable("create", Some(&provisional_id), &e);
                        info!(id = %provisional_id, size = self.items.len(), "Add rolled back");
                        AddOutcome {
                            id: provisional_id,
                            outcome: MutationOutcome::RolledBack,
                        }
                    }
                };
                let _ = respond_to.send(outcome);
            }
            Settlement::Mutated {
                operation,
                id,
                result,
                respond_to,
            } => {
                let outcome = match result {
                    Ok(()) => {
                        debug!(%id, operation, "Confirmed by store");
                        MutationOutcome::Confirmed
                    }
                    Err(e) => {
                        self.mark_unreachable(operation, Some(&id), &e);
                        MutationOutcome::Diverged
                    }
                };
                let _ = respond_to.send(outcome);
            }
        }
    }

    // The store may echo the provisional id or assign its own; keep whichever it chose.
    fn adopt_store_id(&mut self, provisional_id: &str, stored_id: String) -> String {
        if stored_id.is_empty() || stored_id == provisional_id {
            debug!(id = %provisional_id, "Confirmed by store");
            return provisional_id.to_string();
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.id == provisional_id) {
            item.id = stored_id.clone();
        }
        if self.pending_delete.as_deref() == Some(provisional_id) {
            self.pending_delete = Some(stored_id.clone());
        }
        info!(provisional = %provisional_id, id = %stored_id, "Adopted store id");
        stored_id
    }

    fn mark_unreachable(&mut self, operation: &str, id: Option<&str>, error: &StoreError) {
        self.unreachable = true;
        match id {
            Some(id) => warn!(%id, operation, error = %error, "Store unreachable"),
            None => warn!(operation, error = %error, "Store unreachable"),
        }
    }
}

/// Issues timestamp-derived ids, unique for the life of the coordinator.
#[derive(Debug, Default)]
struct ProvisionalIds {
    last: i64,
}

impl ProvisionalIds {
    fn next(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}
