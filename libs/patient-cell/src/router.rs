use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use shared_database::AppState;

use crate::handlers;

pub fn patient_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile/{id}", get(handlers::get_profile))
        .route("/doctors", get(handlers::search_doctors))
        .route("/book-appointment", post(handlers::book_appointment))
        .route("/appointments/{id}", get(handlers::list_appointments))
        .route("/health-records/{id}", get(handlers::list_health_records))
        .route(
            "/available-slots/{doctor_id}/{date}",
            get(handlers::get_available_slots),
        )
        .route(
            "/cancel-appointment/{appointment_id}",
            delete(handlers::cancel_appointment),
        )
        .route("/available-doctors", get(handlers::available_doctors))
        .with_state(state)
}
