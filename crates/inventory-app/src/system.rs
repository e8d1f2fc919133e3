//! # Application State & Lifecycle
//!
//! [`InventorySystem`] wires the shop together: it picks the store backend, starts the
//! coordinator, restores the login session and owns the presentation-facing state.
//!
//! ```rust,ignore
//! let system = InventorySystem::start(&config).await?;
//! if !system.auth.is_authenticated() {
//!     system.login("aa", "1234").await?;   // reloads on success
//! }
//! let view = system.view().await?;
//! system.shutdown().await;
//! ```
//!
//! The collection is loaded once per login (or once at startup when a session was
//! restored). Dropping the coordinator client and awaiting its task is the only
//! shutdown step; the coordinator finishes in-flight store calls first.

use crate::assistant::{AiSuggestion, DescriptionAssistant};
use crate::auth::{AuthError, AuthSession};
use crate::backends;
use crate::config::AppConfig;
use crate::filter::CatalogFilter;
use crate::form::{FormError, FormSubmission, ItemForm};
use inventory_core::{
    view, InventoryActor, InventoryClient, InventoryError, InventoryView, ItemStore,
    MutationOutcome, ReloadOutcome, StoreError,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const COORDINATOR_BUFFER: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ::config::ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Form(#[from] FormError),
}

pub struct InventorySystem {
    /// Handle to the coordinator; clone it freely.
    pub client: InventoryClient,
    pub auth: AuthSession,
    pub filter: CatalogFilter,
    assistant: DescriptionAssistant,
    handle: JoinHandle<()>,
}

impl InventorySystem {
    /// Starts with the backend chosen in `config`.
    pub async fn start(config: &AppConfig) -> Result<Self, SystemError> {
        let store = backends::from_config(&config.store)?;
        Self::start_with_store(config, store).await
    }

    /// Starts over an explicit store. Reloads right away if a session was restored.
    pub async fn start_with_store(
        config: &AppConfig,
        store: Arc<dyn ItemStore>,
    ) -> Result<Self, SystemError> {
        let (actor, client) = InventoryActor::new(COORDINATOR_BUFFER);
        let handle = tokio::spawn(actor.run(store));

        let system = Self {
            client,
            auth: AuthSession::restore(&config.auth),
            filter: CatalogFilter::new(),
            assistant: DescriptionAssistant::new(&config.assistant),
            handle,
        };
        if system.auth.is_authenticated() {
            system.reload().await?;
        }
        Ok(system)
    }

    /// Checks the credentials and loads the collection on success.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), SystemError> {
        self.auth.login(username, password)?;
        self.reload().await?;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    pub async fn reload(&self) -> Result<ReloadOutcome, SystemError> {
        let outcome = self.client.reload().await?;
        if outcome == ReloadOutcome::Unreachable {
            warn!("Showing cached items; store unreachable");
        }
        Ok(outcome)
    }

    /// Catalog contents and dashboard aggregates for the current filter.
    pub async fn view(&self) -> Result<InventoryView, SystemError> {
        let items = self.client.items().await?;
        Ok(view::derive(&items, self.filter.as_view_filter()))
    }

    /// Submits the form through the coordinator: add or replace depending on its mode.
    pub async fn save(&self, form: &ItemForm) -> Result<MutationOutcome, SystemError> {
        let outcome = match form.submit()? {
            FormSubmission::Add(draft) => self.client.add_item(draft).await?.outcome,
            FormSubmission::Edit(item) => self.client.update_item(item).await?,
        };
        info!(?outcome, "Form saved");
        Ok(outcome)
    }

    /// Asks the assistant about the part in `form`. Blank names are not sent.
    pub async fn suggest(&self, form: &ItemForm) -> Option<AiSuggestion> {
        let name = form.name.trim();
        if name.is_empty() {
            return None;
        }
        self.assistant.suggest(name, form.section.as_str()).await
    }

    /// Drops the coordinator client and waits for the coordinator to finish.
    pub async fn shutdown(self) {
        drop(self.client);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Coordinator task failed");
        }
        info!("Inventory system stopped");
    }
}
