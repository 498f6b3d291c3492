use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{repositories, session, views};
pub use infrastructure::{store, utils};

use errors::StoreError;
use repositories::project::ProjectStore;
use settings::{AppConfig, StoreBackend};
use store::{memory::InMemoryStore, supabase::SupabaseStore};

/// The store shared by the controller and the upload handler.
pub type SharedStore = Arc<dyn ProjectStore>;

/// Builds the configured store backend.
pub async fn build_store(config: &AppConfig) -> Result<SharedStore, StoreError> {
    match config.store_backend {
        StoreBackend::Supabase => {
            let store = SupabaseStore::from_config(config)?;
            tracing::info!(url = %store.table_url(), "Using hosted project store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.seed_file {
                Some(path) => InMemoryStore::from_seed_file(path).await?,
                None => InMemoryStore::new(),
            };
            if store.is_empty() {
                tracing::warn!("In-memory project store starts empty; set seed_file to preload projects");
            } else {
                tracing::info!(projects = store.len(), "Using in-memory project store");
            }
            Ok(Arc::new(store))
        }
    }
}
