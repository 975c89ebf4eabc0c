use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::collections;
use shared_models::error::AppError;
use shared_utils::validate_input;

/// Register a new patient: identity account first, then the profile
/// document stored under the account's uid.
#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(err) = validate_input(&body, &["name", "email", "password", "phone"]) {
        return Err(AppError::BadRequest(err));
    }

    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let phone = body["phone"].as_str().unwrap_or_default();

    let uid = state
        .identity
        .create_user(email, password, name)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let profile = json!({
        "name": name,
        "email": email,
        "phone": phone,
        "role": "PATIENT",
        "createdAt": Utc::now().to_rfc3339(),
    });
    state
        .store
        .set(collections::PATIENTS, &uid, profile)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    debug!("Registered patient {}", uid);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Patient registered successfully!", "uid": uid })),
    ))
}

/// Authenticate, then resolve the role by probing the admin, doctor and
/// patient collections in that fixed priority order. Valid credentials
/// with no profile document are still rejected.
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if let Some(err) = validate_input(&body, &["email", "password"]) {
        return Err(AppError::BadRequest(err));
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let uid = state
        .identity
        .sign_in(email, password)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut role = None;
    for (candidate, collection) in [
        ("ADMIN", collections::ADMINS),
        ("DOCTOR", collections::DOCTORS),
        ("PATIENT", collections::PATIENTS),
    ] {
        let doc = state
            .store
            .get(collection, &uid)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if let Some(doc) = doc {
            role = Some((candidate, doc));
            break;
        }
    }

    let (role, user_data) =
        role.ok_or_else(|| AppError::Forbidden("Unauthorized user".to_string()))?;

    Ok(Json(json!({
        "message": "Login successful",
        "uid": uid,
        "role": role,
        "userData": user_data,
    })))
}

/// Fetch the profile document for a uid from the collection named by its
/// role ("DOCTOR" -> "doctors").
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if let Some(err) = validate_input(&body, &["uid", "role"]) {
        return Err(AppError::BadRequest(err));
    }

    let uid = body["uid"].as_str().unwrap_or_default();
    let role = body["role"].as_str().unwrap_or_default();

    let doc = state
        .store
        .get(&collections::for_role(role), uid)
        .await
        .map_err(|_| AppError::Internal("Internal server error".to_string()))?;

    match doc {
        Some(doc) => Ok(Json(doc)),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}
