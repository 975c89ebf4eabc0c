//! In-memory stand-ins for the document store and identity provider.
//! Handler tests run entire request flows against these without a network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::provider::{DocumentStore, Filter, IdentityProvider};
use shared_database::AppState;

/// Documents per collection in insertion order, which doubles as the
/// store-defined order for pagination tests.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
}

fn matches(doc: &Value, filters: &[Filter<'_>]) -> bool {
    filters.iter().all(|(field, value)| doc.get(*field) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d["id"] == json!(id)).cloned()))
    }

    async fn set(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let mut doc = fields;
        if let Value::Object(ref mut map) = doc {
            map.insert("id".to_string(), json!(id));
        }

        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d["id"] == json!(id)) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d["id"] == json!(id)));

        // Absent id is a no-op, like a PATCH matching zero rows.
        if let (Some(Value::Object(doc)), Value::Object(fields)) = (existing, fields) {
            for (key, value) in fields {
                doc.insert(key, value);
            }
        }
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.set(collection, &id, fields).await?;
        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|d| d["id"] != json!(id));
        }
        Ok(())
    }

    async fn delete_matching(&self, collection: &str, filters: &[Filter<'_>]) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|d| !matches(d, filters));
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Value>> {
        let collections = self.collections.lock().unwrap();
        let docs = collections.get(collection).cloned().unwrap_or_default();

        let hits = docs.into_iter().filter(|d| matches(d, filters));
        let hits = hits.skip(offset.unwrap_or(0).max(0) as usize);
        let rows = match limit {
            Some(limit) => hits.take(limit.max(0) as usize).collect(),
            None => hits.collect(),
        };
        Ok(rows)
    }
}

struct Account {
    uid: String,
    email: String,
    password: String,
}

/// Identity fake with the provider's observable behavior: duplicate
/// emails are rejected with the provider's own message, and sign-in
/// checks credentials.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        _display_name: &str,
    ) -> Result<String> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == email) {
            return Err(anyhow!("User already registered"));
        }
        let uid = Uuid::new_v4().to_string();
        accounts.push(Account {
            uid: uid.clone(),
            email: email.to_string(),
            password: password.to_string(),
        });
        Ok(uid)
    }

    async fn delete_user(&self, uid: &str) -> Result<()> {
        self.accounts.lock().unwrap().retain(|a| a.uid != uid);
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        let accounts = self.accounts.lock().unwrap();
        accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.uid.clone())
            .ok_or_else(|| anyhow!("Invalid login credentials"))
    }
}

/// Fresh state over empty in-memory providers.
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(
        Arc::new(MemoryStore::default()),
        Arc::new(MemoryIdentity::default()),
    ))
}
