use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde_json::{json, Value};
use tracing::{debug, error};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::provider::{DocumentStore, Filter, IdentityProvider};

/// Pull the human-readable message out of a GoTrue/PostgREST error body,
/// falling back to the raw text. Creation routes surface this verbatim.
fn provider_message(text: &str) -> String {
    if let Ok(body) = serde_json::from_str::<Value>(text) {
        for key in ["msg", "message", "error_description"] {
            if let Some(msg) = body.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    text.to_string()
}

/// Filter values travel as `column=eq.value` query parameters; strings go
/// bare, everything else in its JSON form (true, 42, ...).
fn filter_segment(filters: &[Filter<'_>]) -> String {
    let mut out = String::new();
    for (column, value) in filters {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("&{}=eq.{}", column, urlencoding::encode(&text)));
    }
    out
}

/// Document store over the Supabase data API. The backend talks with the
/// service-role key, so row-level security does not apply; authorization
/// lives in the routers.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_role_key: String,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        }
    }

    fn get_headers(&self, extra: Option<HeaderMap>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.service_role_key).unwrap());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_role_key)).unwrap(),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(extra) = extra {
            headers.extend(extra);
        }

        headers
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(extra_headers));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store API error ({}): {}", status, error_text);
            return Err(anyhow!(provider_message(&error_text)));
        }

        Ok(response)
    }

    fn query_path(
        collection: &str,
        filters: &[Filter<'_>],
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> String {
        let mut path = format!("/rest/v1/{}?select=*{}", collection, filter_segment(filters));
        if let Some(offset) = offset {
            path.push_str(&format!("&offset={}", offset));
        }
        if let Some(limit) = limit {
            path.push_str(&format!("&limit={}", limit));
        }
        path
    }
}

#[async_trait]
impl DocumentStore for SupabaseStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let rows = self
            .query(collection, &[("id", json!(id))], None, Some(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn set(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let mut doc = fields;
        if let Value::Object(ref mut map) = doc {
            map.insert("id".to_string(), json!(id));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates"),
        );

        self.request(
            Method::POST,
            &format!("/rest/v1/{}", collection),
            Some(doc),
            Some(headers),
        )
        .await?;
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let path = format!(
            "/rest/v1/{}?id=eq.{}",
            collection,
            urlencoding::encode(id)
        );
        self.request(Method::PATCH, &path, Some(fields), None).await?;
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.set(collection, &id, fields).await?;
        Ok(id)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let path = format!(
            "/rest/v1/{}?id=eq.{}",
            collection,
            urlencoding::encode(id)
        );
        self.request(Method::DELETE, &path, None, None).await?;
        Ok(())
    }

    async fn delete_matching(&self, collection: &str, filters: &[Filter<'_>]) -> Result<()> {
        // An unfiltered DELETE would wipe the collection.
        if filters.is_empty() {
            return Err(anyhow!("delete_matching requires at least one filter"));
        }
        let path = format!("/rest/v1/{}?{}", collection, &filter_segment(filters)[1..]);
        self.request(Method::DELETE, &path, None, None).await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Value>> {
        let path = Self::query_path(collection, filters, offset, limit);
        let response = self.request(Method::GET, &path, None, None).await?;
        let rows = response.json::<Vec<Value>>().await?;
        Ok(rows)
    }
}

/// Identity provider over the Supabase auth API: admin endpoints (service
/// role) for account lifecycle, the password grant for sign-in.
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseAuth {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        api_key: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Auth request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header("apikey", api_key)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json");

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Auth API error ({}): {}", status, error_text);
            return Err(anyhow!(provider_message(&error_text)));
        }

        Ok(response)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<String> {
        let body = json!({
            "email": email,
            "password": password,
            "email_confirm": true,
            "user_metadata": { "name": display_name },
        });

        let response = self
            .request(
                Method::POST,
                "/auth/v1/admin/users",
                &self.service_role_key,
                Some(body),
            )
            .await?;

        let user = response.json::<Value>().await?;
        user.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Auth provider returned no user id"))
    }

    async fn delete_user(&self, uid: &str) -> Result<()> {
        let path = format!("/auth/v1/admin/users/{}", uid);
        self.request(Method::DELETE, &path, &self.service_role_key, None)
            .await?;
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        let body = json!({ "email": email, "password": password });

        let response = self
            .request(
                Method::POST,
                "/auth/v1/token?grant_type=password",
                &self.anon_key,
                Some(body),
            )
            .await?;

        let session = response.json::<Value>().await?;
        session
            .pointer("/user/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Auth provider returned no user id"))
    }
}
