use axum::extract::{Json, Path, Query, State};
use serde_json::json;

use admin_cell::handlers::{
    add_doctor, delete_doctor, delete_patient, get_doctor_details, get_patient_details,
    list_appointments, list_doctors, list_patients, update_doctor,
};
use admin_cell::models::PaginationQuery;
use shared_models::error::AppError;
use shared_utils::test_utils::test_state;

fn doctor_payload() -> serde_json::Value {
    json!({
        "name": "Dr Strange",
        "email": "strange@example.com",
        "password": "secret123",
        "specialization": "Cardiology",
        "phone": "555-0101",
    })
}

#[tokio::test]
async fn add_doctor_rejects_missing_fields() {
    let state = test_state();

    for missing in ["name", "email", "password", "specialization", "phone"] {
        let mut body = doctor_payload();
        body.as_object_mut().unwrap().remove(missing);

        let result = add_doctor(State(state.clone()), Json(body)).await;
        match result.unwrap_err() {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, format!("Missing required field: {}", missing))
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn add_doctor_defaults_to_available() {
    let state = test_state();

    let (status, Json(created)) = add_doctor(State(state.clone()), Json(doctor_payload()))
        .await
        .unwrap();
    assert_eq!(status, axum::http::StatusCode::CREATED);

    let uid = created["uid"].as_str().unwrap();
    let doctor = state.store.get("doctors", uid).await.unwrap().unwrap();
    assert_eq!(doctor["available"], json!(true));
    assert_eq!(doctor["role"], json!("DOCTOR"));
    assert_eq!(doctor["specialization"], json!("Cardiology"));
}

#[tokio::test]
async fn update_doctor_merges_arbitrary_fields() {
    let state = test_state();

    state
        .store
        .set("doctors", "doc-1", json!({ "name": "Dr Strange", "available": true }))
        .await
        .unwrap();

    // No whitelist: unknown fields are persisted verbatim.
    let Json(response) = update_doctor(
        State(state.clone()),
        Path("doc-1".to_string()),
        Json(json!({ "phone": "555-0199", "officeFloor": 3 })),
    )
    .await
    .unwrap();
    assert_eq!(response["message"], json!("Doctor details updated successfully!"));

    let doctor = state.store.get("doctors", "doc-1").await.unwrap().unwrap();
    assert_eq!(doctor["phone"], json!("555-0199"));
    assert_eq!(doctor["officeFloor"], json!(3));
    assert_eq!(doctor["name"], json!("Dr Strange"));
}

#[tokio::test]
async fn update_doctor_requires_existing_profile() {
    let state = test_state();

    let result = update_doctor(
        State(state),
        Path("missing".to_string()),
        Json(json!({ "phone": "555-0199" })),
    )
    .await;
    match result.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Doctor not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn delete_doctor_leaves_appointments_intact() {
    let state = test_state();

    let uid = state
        .identity
        .create_user("strange@example.com", "secret123", "Dr Strange")
        .await
        .unwrap();
    state
        .store
        .set("doctors", &uid, json!({ "name": "Dr Strange" }))
        .await
        .unwrap();
    state
        .store
        .add("appointments", json!({ "doctorId": uid, "date": "2026-09-01" }))
        .await
        .unwrap();

    delete_doctor(State(state.clone()), Path(uid.clone())).await.unwrap();

    assert!(state.store.get("doctors", &uid).await.unwrap().is_none());
    let appointments = state
        .store
        .query("appointments", &[("doctorId", json!(uid))], None, None)
        .await
        .unwrap();
    assert_eq!(appointments.len(), 1, "doctor delete must not cascade");

    let doctors = list_doctors(State(state)).await.unwrap();
    assert_eq!(doctors.0["doctors"], json!([]));
}

#[tokio::test]
async fn delete_patient_cascades_health_records_only() {
    let state = test_state();

    let uid = state
        .identity
        .create_user("jane@example.com", "secret123", "Jane Doe")
        .await
        .unwrap();
    state
        .store
        .set("patients", &uid, json!({ "name": "Jane Doe" }))
        .await
        .unwrap();
    state
        .store
        .add("healthRecords", json!({ "patientId": uid, "diagnosis": "flu" }))
        .await
        .unwrap();
    state
        .store
        .add("healthRecords", json!({ "patientId": uid, "diagnosis": "cold" }))
        .await
        .unwrap();
    state
        .store
        .add("healthRecords", json!({ "patientId": "someone-else", "diagnosis": "ok" }))
        .await
        .unwrap();
    state
        .store
        .add("appointments", json!({ "patientId": uid, "date": "2026-09-01" }))
        .await
        .unwrap();

    delete_patient(State(state.clone()), Path(uid.clone())).await.unwrap();

    assert!(state.store.get("patients", &uid).await.unwrap().is_none());
    let records = state
        .store
        .query("healthRecords", &[("patientId", json!(uid))], None, None)
        .await
        .unwrap();
    assert!(records.is_empty(), "cascade must remove the patient's records");

    let others = state
        .store
        .query("healthRecords", &[], None, None)
        .await
        .unwrap();
    assert_eq!(others.len(), 1, "unrelated records must survive");

    let appointments = state
        .store
        .query("appointments", &[("patientId", json!(uid))], None, None)
        .await
        .unwrap();
    assert_eq!(appointments.len(), 1, "appointments must not cascade");
}

#[tokio::test]
async fn appointment_listing_paginates() {
    let state = test_state();

    for n in 1..=12 {
        state
            .store
            .add("appointments", json!({ "seq": n, "status": "Scheduled" }))
            .await
            .unwrap();
    }

    let Json(page) = list_appointments(
        State(state.clone()),
        Query(PaginationQuery { page: Some(2), limit: Some(5) }),
    )
    .await
    .unwrap();
    let appointments = page["appointments"].as_array().unwrap();
    let seqs: Vec<i64> = appointments
        .iter()
        .map(|a| a["seq"].as_i64().unwrap())
        .collect();
    assert_eq!(seqs, vec![6, 7, 8, 9, 10]);

    // Page beyond the end is an empty list, not an error.
    let Json(past_end) = list_appointments(
        State(state.clone()),
        Query(PaginationQuery { page: Some(4), limit: Some(5) }),
    )
    .await
    .unwrap();
    assert_eq!(past_end["appointments"], json!([]));

    // Defaults: page 1, limit 10.
    let Json(first) = list_appointments(
        State(state),
        Query(PaginationQuery { page: None, limit: None }),
    )
    .await
    .unwrap();
    assert_eq!(first["appointments"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn listings_annotate_documents_with_ids() {
    let state = test_state();

    state
        .store
        .set("patients", "pat-1", json!({ "name": "Jane Doe" }))
        .await
        .unwrap();

    let Json(listed) = list_patients(State(state.clone())).await.unwrap();
    let patients = listed["patients"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["id"], json!("pat-1"));

    state
        .store
        .set("doctors", "doc-1", json!({ "name": "Dr Strange" }))
        .await
        .unwrap();

    let Json(details) = get_doctor_details(State(state.clone()), Path("doc-1".to_string()))
        .await
        .unwrap();
    assert_eq!(details["doctor"]["name"], json!("Dr Strange"));

    let result = get_doctor_details(State(state), Path("missing".to_string())).await;
    match result.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Doctor not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn patient_details_include_health_records() {
    let state = test_state();

    state
        .store
        .set("patients", "pat-1", json!({ "name": "Jane Doe" }))
        .await
        .unwrap();
    state
        .store
        .add("healthRecords", json!({ "patientId": "pat-1", "diagnosis": "flu" }))
        .await
        .unwrap();

    let Json(details) = get_patient_details(State(state.clone()), Path("pat-1".to_string()))
        .await
        .unwrap();
    assert_eq!(details["patient"]["name"], json!("Jane Doe"));
    assert_eq!(details["healthRecords"].as_array().unwrap().len(), 1);

    let result = get_patient_details(State(state), Path("missing".to_string())).await;
    match result.unwrap_err() {
        AppError::NotFound(msg) => assert_eq!(msg, "Patient not found"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}
