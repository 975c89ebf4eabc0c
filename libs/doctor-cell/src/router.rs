use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile/{id}", get(handlers::get_profile))
        .route("/appointments/{doctor_id}", get(handlers::list_appointments))
        .route("/status/{id}", put(handlers::update_status))
        .route("/upload-record", post(handlers::upload_record))
        .route(
            "/update-appointment/{appointment_id}",
            put(handlers::update_appointment),
        )
        .with_state(state)
}
