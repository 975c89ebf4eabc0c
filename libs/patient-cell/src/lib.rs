pub mod handlers;
pub mod models;
pub mod router;
pub mod slots;

pub use router::patient_routes;
