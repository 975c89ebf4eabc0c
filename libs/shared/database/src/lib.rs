pub mod provider;
pub mod state;
pub mod supabase;

pub use provider::{DocumentStore, IdentityProvider};
pub use state::AppState;
