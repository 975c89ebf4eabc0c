use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Equality filter on a document field.
pub type Filter<'a> = (&'a str, Value);

/// Schema-less document store. Collections are created on first write;
/// every document read back carries its id under the "id" key.
///
/// Referential integrity between collections is caller-maintained.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document by id, or None if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Write a document at a caller-chosen id, overwriting any existing one.
    async fn set(&self, collection: &str, id: &str, fields: Value) -> Result<()>;

    /// Merge partial fields into an existing document. Merging into an
    /// absent id is a no-op, matching PostgREST PATCH semantics.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<()>;

    /// Insert a document under a generated id and return that id.
    async fn add(&self, collection: &str, fields: Value) -> Result<String>;

    /// Delete a single document by id. Deleting an absent id succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Delete every document matching all filters in one batched call.
    /// The deletions are atomic among themselves, but carry no guarantee
    /// relative to any other operation.
    async fn delete_matching(&self, collection: &str, filters: &[Filter<'_>]) -> Result<()>;

    /// Equality-filtered scan with optional offset/limit pagination.
    /// An offset past the end returns an empty list, not an error.
    async fn query(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Value>>;
}

/// External identity service. Profile documents are stored under the
/// uid this provider hands out, a 1:1 join by id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return its uid. Errors carry the provider's
    /// own message (duplicate email, weak password) verbatim.
    async fn create_user(&self, email: &str, password: &str, display_name: &str)
        -> Result<String>;

    /// Remove an account by uid.
    async fn delete_user(&self, uid: &str) -> Result<()>;

    /// Authenticate credentials and return the account's uid.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String>;
}
