//! # Parts Shop Inventory
//!
//! The shop application on top of [`inventory_core`]:
//!
//! - [`config`]: file + environment configuration.
//! - [`backends`]: HTTP and local-file [`ItemStore`](inventory_core::ItemStore)s.
//! - [`auth`]: the single-user login gate.
//! - [`assistant`]: AI-written part descriptions.
//! - [`form`] and [`filter`]: state behind the add/edit form and the catalog filters.
//! - [`system`]: [`InventorySystem`](system::InventorySystem), which wires it all up.

pub mod assistant;
pub mod auth;
pub mod backends;
pub mod config;
pub mod filter;
pub mod form;
pub mod system;
