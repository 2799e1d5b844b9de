use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::AppState;
use crate::errors::{AppError, render};
use crate::models::list_view::ListParams;
use crate::models::listing::{Listing, build_query, filter_keys};
use crate::models::role::{Profile, Role};
use crate::templates_structs::{ListTemplate, PageContext};

/// The role in the path, provided it may open `R`'s section.
pub fn resolve_role<R: Listing>(slug: &str) -> Result<Role, AppError> {
    match Role::from_slug(slug) {
        Some(role) if role.can_view(R::SECTION) => Ok(role),
        _ => Err(AppError::NotFound),
    }
}

/// GET /{role}/{section}
/// Query params: q, page, per_page, sort, dir and the dataset's filter keys.
pub async fn page<R: Listing>(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let role = resolve_role::<R>(&path)?;
    let profile = Profile::demo(role);
    let today = state.today();
    let params = ListParams::from_query(&query, &filter_keys::<R>())?;

    let loaded = state.loader.load_listing::<R>(today).await;

    let list_query = build_query::<R>(&params, &profile, state.config.page_size)?;
    let (view, summary) = list_query.run_with_summary(loaded.records(), &R::summary(today));
    log::debug!(
        "{} for {}: {} matched, page {}/{}",
        R::SOURCE,
        role.slug(),
        view.total_matched,
        view.applied_page,
        view.total_pages
    );

    let (stats, error) = match loaded.error() {
        Some(e) => (Vec::new(), Some(e.to_string())),
        None => (R::stat_cards(&summary), None),
    };
    let base_url = role.url_for(R::SECTION);
    let ctx = PageContext::build(&state.config.app_name, &profile, req.path(), R::TITLE, today);
    render(ListTemplate::build::<R>(ctx, &base_url, &params, &view, stats, error, today))
}
