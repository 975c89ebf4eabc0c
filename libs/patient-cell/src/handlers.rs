use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use shared_database::provider::Filter;
use shared_database::AppState;
use shared_models::collections;
use shared_models::error::AppError;
use shared_utils::names::display_names;
use shared_utils::{page_window, validate_input};

use crate::models::DoctorSearchQuery;
use crate::slots::available_slots;

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let patient = state
        .store
        .get(collections::PATIENTS, &patient_id)
        .await
        .map_err(|_| AppError::Internal("Internal server error".to_string()))?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let (offset, limit) = page_window(query.page, query.limit);

    let mut filters: Vec<Filter<'_>> = Vec::new();
    if let Some(ref specialization) = query.specialization {
        filters.push(("specialization", json!(specialization)));
    }

    let doctors = state
        .store
        .query(collections::DOCTORS, &filters, Some(offset), Some(limit))
        .await
        .map_err(|_| AppError::Internal("Error fetching doctors".to_string()))?;

    Ok(Json(json!({ "doctors": doctors })))
}

/// Book a slot as-is. There is deliberately no conflict check here;
/// callers query available slots first, and a race simply double-books.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if let Some(err) = validate_input(&body, &["patientId", "doctorId", "date", "time"]) {
        return Err(AppError::BadRequest(err));
    }

    let appointment = json!({
        "patientId": body["patientId"],
        "doctorId": body["doctorId"],
        "date": body["date"],
        "time": body["time"],
        "status": "Scheduled",
        "createdAt": Utc::now().to_rfc3339(),
    });

    state
        .store
        .add(collections::APPOINTMENTS, appointment)
        .await
        .map_err(|_| AppError::Internal("Error booking appointment".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Appointment booked successfully!" })),
    ))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .store
        .query(
            collections::APPOINTMENTS,
            &[("patientId", json!(patient_id))],
            None,
            None,
        )
        .await
        .map_err(|_| AppError::Internal("Error fetching appointments".to_string()))?;

    Ok(Json(json!({ "appointments": appointments })))
}

/// List a patient's health records with each doctor's display name
/// attached, defaulting to "Unknown" for doctors since deleted.
#[axum::debug_handler]
pub async fn list_health_records(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut records = state
        .store
        .query(
            collections::HEALTH_RECORDS,
            &[("patientId", json!(patient_id))],
            None,
            None,
        )
        .await
        .map_err(|e| {
            error!("Error fetching health records: {}", e);
            AppError::Internal("Error fetching health records".to_string())
        })?;

    if records.is_empty() {
        return Err(AppError::NotFound("No health records found".to_string()));
    }

    let doctor_ids: HashSet<String> = records
        .iter()
        .filter_map(|r| r["doctorId"].as_str().map(str::to_string))
        .collect();
    let names = display_names(&state.store, collections::DOCTORS, doctor_ids).await;

    for record in &mut records {
        let name = record["doctorId"]
            .as_str()
            .and_then(|id| names.get(id))
            .map(String::as_str)
            .unwrap_or("Unknown");
        record["doctorName"] = json!(name);
    }

    Ok(Json(json!({ "records": records })))
}

/// Candidate half-hour slots for a doctor and date, minus the times
/// already taken by that doctor's appointments on that date.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, date)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .store
        .query(
            collections::APPOINTMENTS,
            &[("doctorId", json!(doctor_id)), ("date", json!(date))],
            None,
            None,
        )
        .await
        .map_err(|e| {
            error!("Error fetching available slots: {}", e);
            AppError::Internal("Error fetching available slots".to_string())
        })?;

    let booked: Vec<String> = appointments
        .iter()
        .filter_map(|a| a["time"].as_str().map(str::to_string))
        .collect();

    Ok(Json(json!({ "availableSlots": available_slots(&booked) })))
}

/// Unconditional delete: cancelling an unknown appointment id still
/// reports success.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .delete(collections::APPOINTMENTS, &appointment_id)
        .await
        .map_err(|_| AppError::Internal("Error canceling appointment".to_string()))?;

    Ok(Json(json!({ "message": "Appointment canceled successfully!" })))
}

#[axum::debug_handler]
pub async fn available_doctors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let (offset, limit) = page_window(query.page, query.limit);

    let mut filters: Vec<Filter<'_>> = vec![("available", json!(true))];
    if let Some(ref specialization) = query.specialization {
        filters.push(("specialization", json!(specialization)));
    }

    let doctors = state
        .store
        .query(collections::DOCTORS, &filters, Some(offset), Some(limit))
        .await
        .map_err(|_| AppError::Internal("Error fetching available doctors".to_string()))?;

    Ok(Json(json!({ "doctors": doctors })))
}
