use serde::Deserialize;

/// Doctor search parameters: optional specialization filter plus the
/// usual 1-indexed pagination.
#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub specialization: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
