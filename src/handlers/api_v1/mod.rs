pub mod lists;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::AppError;
use crate::templates_structs::ApiErrorResponse;

/// JSON body for a failed API call; status follows `AppError`.
pub fn error_json(e: &AppError) -> HttpResponse {
    let status = e.status_code();
    if status.is_server_error() {
        log::error!("{e}");
    }
    HttpResponse::build(status).json(ApiErrorResponse {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        details: Some(e.to_string()),
    })
}
