use std::sync::Arc;

use shared_config::AppConfig;

use crate::provider::{DocumentStore, IdentityProvider};
use crate::supabase::{SupabaseAuth, SupabaseStore};

/// Process-wide dependencies handed to every router at construction.
/// Holding trait objects keeps the handlers substitutable with in-memory
/// fakes in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(SupabaseStore::new(config)),
            identity: Arc::new(SupabaseAuth::new(config)),
        }
    }
}
