use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_database::supabase::{SupabaseAuth, SupabaseStore};
use shared_database::{DocumentStore, IdentityProvider};

fn test_config(base_url: String) -> AppConfig {
    AppConfig {
        port: 5000,
        supabase_url: base_url,
        supabase_anon_key: "anon-key".to_string(),
        supabase_service_role_key: "service-key".to_string(),
    }
}

#[tokio::test]
async fn query_sends_filters_and_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("select", "*"))
        .and(query_param("specialization", "eq.Cardiology"))
        .and(query_param("available", "eq.true"))
        .and(query_param("offset", "5"))
        .and(query_param("limit", "5"))
        .and(header("apikey", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "doc-1", "name": "Dr A", "specialization": "Cardiology" }
        ])))
        .mount(&server)
        .await;

    let store = SupabaseStore::new(&test_config(server.uri()));
    let rows = store
        .query(
            "doctors",
            &[
                ("specialization", json!("Cardiology")),
                ("available", json!(true)),
            ],
            Some(5),
            Some(5),
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!("doc-1"));
}

#[tokio::test]
async fn get_resolves_to_none_when_no_rows_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", "eq.pat-1"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = SupabaseStore::new(&test_config(server.uri()));
    assert!(store.get("patients", "pat-1").await.unwrap().is_none());
}

#[tokio::test]
async fn set_upserts_with_the_id_embedded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .and(header("Prefer", "resolution=merge-duplicates"))
        .and(body_partial_json(json!({ "id": "doc-1", "name": "Dr A" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseStore::new(&test_config(server.uri()));
    store
        .set("doctors", "doc-1", json!({ "name": "Dr A" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_patches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("id", "eq.doc-1"))
        .and(body_partial_json(json!({ "available": false })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseStore::new(&test_config(server.uri()));
    store
        .update("doctors", "doc-1", json!({ "available": false }))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_matching_issues_one_batched_call() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/healthRecords"))
        .and(query_param("patientId", "eq.pat-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let store = SupabaseStore::new(&test_config(server.uri()));
    store
        .delete_matching("healthRecords", &[("patientId", json!("pat-1"))])
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_matching_refuses_an_empty_filter() {
    let server = MockServer::start().await;
    let store = SupabaseStore::new(&test_config(server.uri()));
    assert!(store.delete_matching("healthRecords", &[]).await.is_err());
}

#[tokio::test]
async fn create_user_returns_uid_and_surfaces_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(header("apikey", "service-key"))
        .and(body_partial_json(json!({ "email": "jane@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "uid-1" })))
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&test_config(server.uri()));
    let uid = auth
        .create_user("jane@example.com", "secret123", "Jane Doe")
        .await
        .unwrap();
    assert_eq!(uid, "uid-1");

    // Duplicate email: the provider's message comes back verbatim.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "msg": "User already registered" })),
        )
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&test_config(server.uri()));
    let err = auth
        .create_user("jane@example.com", "secret123", "Jane Doe")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "User already registered");
}

#[tokio::test]
async fn sign_in_uses_the_password_grant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt",
            "user": { "id": "uid-1" }
        })))
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&test_config(server.uri()));
    let uid = auth.sign_in("jane@example.com", "secret123").await.unwrap();
    assert_eq!(uid, "uid-1");
}

#[tokio::test]
async fn delete_user_hits_the_admin_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/v1/admin/users/uid-1"))
        .and(header("apikey", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = SupabaseAuth::new(&test_config(server.uri()));
    auth.delete_user("uid-1").await.unwrap();
}
