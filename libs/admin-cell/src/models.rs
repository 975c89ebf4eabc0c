use serde::Deserialize;

/// 1-indexed pagination taken from query parameters; defaults applied in
/// `shared_utils::page_window`.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
