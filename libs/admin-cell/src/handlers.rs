use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_database::AppState;
use shared_models::collections;
use shared_models::error::AppError;
use shared_utils::{page_window, validate_input};

use crate::models::PaginationQuery;

/// Create a doctor account plus its profile document, available by
/// default. Provider failures (duplicate email, weak password) surface
/// with the provider's own message.
#[axum::debug_handler]
pub async fn add_doctor(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(err) = validate_input(
        &body,
        &["name", "email", "password", "specialization", "phone"],
    ) {
        return Err(AppError::BadRequest(err));
    }

    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let uid = state
        .identity
        .create_user(email, password, name)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let profile = json!({
        "name": name,
        "email": email,
        "specialization": body["specialization"],
        "phone": body["phone"],
        "role": "DOCTOR",
        "available": true,
        "createdAt": Utc::now().to_rfc3339(),
    });
    state
        .store
        .set(collections::DOCTORS, &uid, profile)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    debug!("Added doctor {}", uid);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Doctor added successfully!", "uid": uid })),
    ))
}

/// Merge the submitted body into an existing doctor document verbatim.
/// There is no field whitelist; the store is schema-less.
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let existing = state
        .store
        .get(collections::DOCTORS, &doctor_id)
        .await
        .map_err(|_| AppError::Internal("Internal server error".to_string()))?;
    if existing.is_none() {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    state
        .store
        .update(collections::DOCTORS, &doctor_id, body)
        .await
        .map_err(|_| AppError::Internal("Internal server error".to_string()))?;

    Ok(Json(
        json!({ "message": "Doctor details updated successfully!" }),
    ))
}

/// Remove the identity account, then the profile. The two deletes are not
/// transactional; a failure in between leaves a dangling profile.
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .identity
        .delete_user(&doctor_id)
        .await
        .map_err(|_| AppError::Internal("Error deleting doctor".to_string()))?;

    state
        .store
        .delete(collections::DOCTORS, &doctor_id)
        .await
        .map_err(|_| AppError::Internal("Error deleting doctor".to_string()))?;

    Ok(Json(json!({ "message": "Doctor deleted successfully!" })))
}

/// Remove the identity, the profile, and every health record naming the
/// patient. The record deletions go out as one batch; appointments are
/// deliberately left alone.
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .identity
        .delete_user(&patient_id)
        .await
        .map_err(|_| AppError::Internal("Error deleting patient".to_string()))?;

    state
        .store
        .delete(collections::PATIENTS, &patient_id)
        .await
        .map_err(|_| AppError::Internal("Error deleting patient".to_string()))?;

    state
        .store
        .delete_matching(
            collections::HEALTH_RECORDS,
            &[("patientId", json!(patient_id))],
        )
        .await
        .map_err(|_| AppError::Internal("Error deleting patient".to_string()))?;

    Ok(Json(json!({ "message": "Patient deleted successfully!" })))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let patients = state
        .store
        .query(collections::PATIENTS, &[], None, None)
        .await
        .map_err(|_| AppError::Internal("Error fetching patients".to_string()))?;

    Ok(Json(json!({ "patients": patients })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let doctors = state
        .store
        .query(collections::DOCTORS, &[], None, None)
        .await
        .map_err(|_| AppError::Internal("Error fetching doctors".to_string()))?;

    Ok(Json(json!({ "doctors": doctors })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Value>, AppError> {
    let (offset, limit) = page_window(query.page, query.limit);

    let appointments = state
        .store
        .query(collections::APPOINTMENTS, &[], Some(offset), Some(limit))
        .await
        .map_err(|e| {
            error!("Error fetching appointments: {}", e);
            AppError::Internal("Error fetching appointments".to_string())
        })?;

    Ok(Json(json!({ "appointments": appointments })))
}

/// Full patient view: the profile plus every health record for them.
#[axum::debug_handler]
pub async fn get_patient_details(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = state
        .store
        .get(collections::PATIENTS, &patient_id)
        .await
        .map_err(|_| AppError::Internal("Error fetching patient details".to_string()))?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    let health_records = state
        .store
        .query(
            collections::HEALTH_RECORDS,
            &[("patientId", json!(patient_id))],
            None,
            None,
        )
        .await
        .map_err(|_| AppError::Internal("Error fetching patient details".to_string()))?;

    Ok(Json(json!({
        "patient": patient,
        "healthRecords": health_records,
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_details(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .store
        .get(collections::DOCTORS, &doctor_id)
        .await
        .map_err(|_| AppError::Internal("Error fetching doctor details".to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({ "doctor": doctor })))
}
