use askama::Template;
use chrono::NaiveDate;

use crate::models::list_view::params::ANY;
use crate::models::list_view::{ListParams, SortDir, ViewResult};
use crate::models::listing::{Cell, Listing, StatCard};
use super::PageContext;

pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub struct FilterView {
    pub key: String,
    pub label: String,
    pub any_value: String,
    pub options: Vec<FilterOption>,
}

pub struct HeaderView {
    pub label: String,
    pub sortable: bool,
    pub url: String,
    /// "▲", "▼" or empty.
    pub indicator: String,
}

pub struct PageLink {
    pub number: usize,
    pub url: String,
    pub is_current: bool,
}

pub struct Pager {
    pub links: Vec<PageLink>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub summary: String,
}

/// Page numbers shown around the current one.
const PAGER_WINDOW: usize = 2;

impl Pager {
    pub fn build<R>(base: &str, params: &ListParams, view: &ViewResult<'_, R>) -> Self {
        let url = |n: usize| format!("{base}?{}", params.query_for_page(n));
        let current = view.applied_page;
        let lo = current.saturating_sub(PAGER_WINDOW).max(1);
        let hi = (current + PAGER_WINDOW).min(view.total_pages);
        let links = (lo..=hi)
            .map(|n| PageLink { number: n, url: url(n), is_current: n == current })
            .collect();
        let summary = if view.is_empty() {
            "No results".to_string()
        } else {
            format!(
                "Showing {}–{} of {} · page {} of {}",
                view.first_position(),
                view.last_position(),
                view.total_matched,
                current,
                view.total_pages
            )
        };
        Pager {
            links,
            prev_url: view.has_previous().then(|| url(current - 1)),
            next_url: view.has_next().then(|| url(current + 1)),
            summary,
        }
    }
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub ctx: PageContext,
    pub base_url: String,
    pub search: String,
    pub sort: String,
    pub dir: String,
    pub per_page: String,
    pub filters: Vec<FilterView>,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<Vec<Cell>>,
    pub stats: Vec<StatCard>,
    pub pager: Pager,
    pub error: Option<String>,
    pub filters_active: bool,
}

impl ListTemplate {
    pub fn build<R: Listing>(
        ctx: PageContext,
        base_url: &str,
        params: &ListParams,
        view: &ViewResult<'_, R>,
        stats: Vec<StatCard>,
        error: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let filters = R::filter_fields()
            .into_iter()
            .map(|field| {
                let current = params.filter(field.key);
                FilterView {
                    key: field.key.to_string(),
                    label: field.label.to_string(),
                    any_value: ANY.to_string(),
                    options: field
                        .options
                        .into_iter()
                        .map(|(value, label)| FilterOption {
                            selected: current == Some(value.as_str()),
                            value,
                            label,
                        })
                        .collect(),
                }
            })
            .collect();

        let headers = R::columns()
            .into_iter()
            .map(|col| {
                let active = params.sort.as_deref() == Some(col.key);
                let indicator = match (active, params.dir) {
                    (true, SortDir::Asc) => "▲",
                    (true, SortDir::Desc) => "▼",
                    (false, _) => "",
                };
                HeaderView {
                    label: col.label.to_string(),
                    sortable: col.sortable,
                    url: format!("{base_url}?{}", params.query_for_sort(col.key)),
                    indicator: indicator.to_string(),
                }
            })
            .collect();

        ListTemplate {
            ctx,
            base_url: base_url.to_string(),
            search: params.q.clone(),
            sort: params.sort.clone().unwrap_or_default(),
            dir: params.dir.as_str().to_string(),
            per_page: params.per_page.map(|n| n.to_string()).unwrap_or_default(),
            filters,
            headers,
            rows: view.items.iter().map(|r| r.row(today)).collect(),
            stats,
            pager: Pager::build(base_url, params, view),
            error,
            filters_active: !params.q.trim().is_empty() || !params.filters.is_empty(),
        }
    }
}
