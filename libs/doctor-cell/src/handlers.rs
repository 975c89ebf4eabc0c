use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use shared_database::AppState;
use shared_models::collections;
use shared_models::error::AppError;
use shared_utils::names::display_names;
use shared_utils::validate_input;

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .store
        .get(collections::DOCTORS, &doctor_id)
        .await
        .map_err(|_| AppError::Internal("Internal server error".to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(doctor))
}

/// List a doctor's appointments with each patient's display name attached.
/// Patient lookups fan out concurrently and all join before the response;
/// a deleted patient shows up as "Unknown".
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut appointments = state
        .store
        .query(
            collections::APPOINTMENTS,
            &[("doctorId", json!(doctor_id))],
            None,
            None,
        )
        .await
        .map_err(|e| {
            error!("Error fetching appointments: {}", e);
            AppError::Internal("Error fetching appointments".to_string())
        })?;

    if appointments.is_empty() {
        return Err(AppError::NotFound("No appointments found".to_string()));
    }

    let patient_ids: HashSet<String> = appointments
        .iter()
        .filter_map(|a| a["patientId"].as_str().map(str::to_string))
        .collect();
    let names = display_names(&state.store, collections::PATIENTS, patient_ids).await;

    for appointment in &mut appointments {
        let name = appointment["patientId"]
            .as_str()
            .and_then(|id| names.get(id))
            .map(String::as_str)
            .unwrap_or("Unknown");
        appointment["patientName"] = json!(name);
    }

    Ok(Json(json!({ "appointments": appointments })))
}

/// Flip the doctor's availability flag. `false` is a legitimate value, so
/// this takes the key's presence as the only requirement.
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let available = body
        .get("available")
        .and_then(Value::as_bool)
        .ok_or_else(|| AppError::BadRequest("Missing required field: available".to_string()))?;

    let existing = state
        .store
        .get(collections::DOCTORS, &doctor_id)
        .await
        .map_err(|_| AppError::Internal("Error updating availability".to_string()))?;
    if existing.is_none() {
        return Err(AppError::NotFound("Doctor not found".to_string()));
    }

    state
        .store
        .update(
            collections::DOCTORS,
            &doctor_id,
            json!({ "available": available }),
        )
        .await
        .map_err(|e| {
            error!("Store update error: {}", e);
            AppError::Internal("Error updating availability".to_string())
        })?;

    Ok(Json(json!({ "message": "Doctor status updated successfully!" })))
}

#[axum::debug_handler]
pub async fn upload_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(err) = validate_input(
        &body,
        &["doctorId", "patientId", "diagnosis", "prescription", "notes"],
    ) {
        return Err(AppError::BadRequest(err));
    }

    let record = json!({
        "doctorId": body["doctorId"],
        "patientId": body["patientId"],
        "diagnosis": body["diagnosis"],
        "prescription": body["prescription"],
        "notes": body["notes"],
        "createdAt": Utc::now().to_rfc3339(),
    });

    state
        .store
        .add(collections::HEALTH_RECORDS, record)
        .await
        .map_err(|_| AppError::Internal("Error uploading health record".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Health record uploaded successfully!" })),
    ))
}

/// Merge a new status into an appointment. No existence pre-check: a
/// merge against an unknown id is a no-op at the store level.
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    if let Some(err) = validate_input(&body, &["status"]) {
        return Err(AppError::BadRequest(err));
    }

    state
        .store
        .update(
            collections::APPOINTMENTS,
            &appointment_id,
            json!({ "status": body["status"] }),
        )
        .await
        .map_err(|_| AppError::Internal("Error updating appointment status".to_string()))?;

    Ok(Json(
        json!({ "message": "Appointment status updated successfully!" }),
    ))
}
