use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::AppState;
use crate::errors::AppError;
use crate::handlers::listing::resolve_role;
use crate::loader::LoadState;
use crate::models::list_view::ListParams;
use crate::models::listing::{Listing, build_query, filter_keys};
use crate::models::role::Profile;
use crate::templates_structs::ApiListResponse;
use super::error_json;

/// GET /api/v1/{role}/{section}
/// Same parameters and scoping as the HTML list; errors come back as JSON.
pub async fn list<R: Listing + Serialize>(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    match respond::<R>(&state, &path, &query).await {
        Ok(response) => response,
        Err(e) => error_json(&e),
    }
}

async fn respond<R: Listing + Serialize>(
    state: &AppState,
    role_slug: &str,
    query: &HashMap<String, String>,
) -> Result<HttpResponse, AppError> {
    let role = resolve_role::<R>(role_slug)?;
    let profile = Profile::demo(role);
    let today = state.today();
    let params = ListParams::from_query(query, &filter_keys::<R>())?;

    let records = match state.loader.load_listing::<R>(today).await {
        LoadState::Loaded(records) => records,
        LoadState::Failed(e) => return Err(e.into()),
        LoadState::Loading => Vec::new(),
    };

    let list_query = build_query::<R>(&params, &profile, state.config.page_size)?;
    let (view, summary) = list_query.run_with_summary(&records, &R::summary(today));
    Ok(HttpResponse::Ok().json(ApiListResponse::new(view, summary)))
}
