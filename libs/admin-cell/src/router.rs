use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/add-doctor", post(handlers::add_doctor))
        .route("/update-doctor/{id}", put(handlers::update_doctor))
        .route("/delete-doctor/{id}", delete(handlers::delete_doctor))
        .route("/delete-patient/{id}", delete(handlers::delete_patient))
        .route("/patients", get(handlers::list_patients))
        .route("/doctors", get(handlers::list_doctors))
        .route("/all-appointments", get(handlers::list_appointments))
        .route("/patient/{id}", get(handlers::get_patient_details))
        .route("/doctor/{id}", get(handlers::get_doctor_details))
        .with_state(state)
}
