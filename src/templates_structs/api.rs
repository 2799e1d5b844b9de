use serde::Serialize;

use crate::models::list_view::{Summary, ViewResult};

/// Page of a role-scoped list as served under `/api/v1`.
#[derive(Serialize, Debug)]
pub struct ApiListResponse<'r, T: Serialize> {
    pub items: Vec<&'r T>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub applied_page: usize,
    pub page_size: usize,
    pub summary: Summary,
}

impl<'r, T: Serialize> ApiListResponse<'r, T> {
    pub fn new(view: ViewResult<'r, T>, summary: Summary) -> Self {
        Self {
            items: view.items,
            total_matched: view.total_matched,
            total_pages: view.total_pages,
            applied_page: view.applied_page,
            page_size: view.page_size,
            summary,
        }
    }
}

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
