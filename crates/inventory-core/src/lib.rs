//! # Inventory Core
//!
//! Engine of the parts-shop inventory: the data model, the localized numeral codec, the
//! store contract, the optimistic mutation coordinator and the derived view model.
//!
//! ## Architecture Overview
//!
//! 1. **Model** ([`model`]) - [`InventoryItem`] and its closed enums.
//! 2. **Store contract** ([`ItemStore`]) - one attempt per call against the remote collection.
//! 3. **Coordinator** ([`InventoryActor`] + [`InventoryClient`]) - sole owner of the
//!    in-memory collection; applies changes optimistically and reconciles store results.
//! 4. **View** ([`view`]) - pure filtering and aggregates for the catalog.
//!
//! ## Concurrency Model
//!
//! The coordinator runs in its own Tokio task and handles requests sequentially, so the
//! collection is never shared. Store calls run in spawned tasks and report back through
//! the same loop. Operations are not serialized against each other: the store sees them
//! in whatever order they complete.
//!
//! ```rust
//! use inventory_core::mock::MockItemStore;
//! use inventory_core::{view, InventoryActor, ItemDraft, Section, VehicleType, ViewFilter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MockItemStore::new();
//!     let (actor, client) = InventoryActor::new(16);
//!     tokio::spawn(actor.run(Arc::new(store.clone())));
//!
//!     let draft = ItemDraft {
//!         name: "Brake pad".into(),
//!         vehicle_type: VehicleType::Motorbike,
//!         section: Section::Cockpit,
//!         price: 3500.0,
//!         quantity: 6,
//!         description: String::new(),
//!         image: None,
//!         min_stock_threshold: 3,
//!     };
//!     let created = inventory_core::InventoryItem::from_draft("p-1", draft.clone());
//!     store.expect_create().return_ok(created);
//!     client.add_item(draft).await.unwrap();
//!
//!     let items = client.items().await.unwrap();
//!     let shown = view::derive(&items, &ViewFilter::new(VehicleType::Motorbike));
//!     assert_eq!(shown.summary.total_quantity, 6);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockItemStore`] scripts store replies, including failures and replies held
//! open while a test inspects the optimistic state.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod model;
pub mod numeral;
pub mod store;
pub mod tracing;
pub mod view;

pub use actor::InventoryActor;
pub use client::InventoryClient;
pub use error::InventoryError;
pub use message::{AddOutcome, InventoryRequest, InventorySnapshot, MutationOutcome, ReloadOutcome};
pub use model::{InventoryItem, ItemDraft, ItemPatch, Section, StockLevel, VehicleType};
pub use store::{ItemStore, StoreError};
pub use view::{InventoryView, StockSummary, ViewFilter};
