//! Dataset registry: what each portal table exposes to the list pipeline.
//!
//! Every dataset implements `Listing` once (its filters, search fields, sort
//! columns, role scoping, summary and table rendering) and the generic page
//! and API handlers do the rest.

use chrono::NaiveDate;

use crate::models::list_view::{
    FilterSpec, ListError, ListParams, ListQuery, Predicate, SearchSpec, SortDir, SortSpec,
    Summary, SummarySpec,
};
use crate::models::role::{Profile, Section};

pub mod choice;
pub mod display;

pub use choice::{Choice, parse_choice};
pub use display::{Cell, ColumnDef, FilterField, StatCard};

/// Filter name reserved for the role scoping predicate.
pub const SCOPE_FILTER: &str = "scope";

pub trait Listing: Sized + 'static {
    const SECTION: Section;
    /// Loader key, also used to simulate failures per source.
    const SOURCE: &'static str;
    const TITLE: &'static str;

    /// Mock collection standing in for a backend; dates relative to `today`.
    fn fixtures(today: NaiveDate) -> Vec<Self>;

    fn filter_fields() -> Vec<FilterField>;

    /// Predicate for a selected filter value. Unknown keys or values are
    /// invalid arguments.
    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError>;

    fn search(term: &str) -> SearchSpec<'static, Self>;

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError>;

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        None
    }

    /// Restricts the collection to what `profile` may see.
    fn scope(_profile: &Profile) -> Option<Predicate<'static, Self>> {
        None
    }

    fn columns() -> Vec<ColumnDef>;

    /// One table row, cell for cell with `columns()`.
    fn row(&self, today: NaiveDate) -> Vec<Cell>;

    /// Aggregates over the survivors; `today` anchors date-relative counts.
    fn summary(today: NaiveDate) -> SummarySpec<'static, Self>;

    fn stat_cards(summary: &Summary) -> Vec<StatCard>;
}

pub fn filter_keys<R: Listing>() -> Vec<&'static str> {
    R::filter_fields().iter().map(|f| f.key).collect()
}

/// Assemble one request's `ListQuery` for dataset `R`.
pub fn build_query<R: Listing>(
    params: &ListParams,
    profile: &Profile,
    default_page_size: i64,
) -> Result<ListQuery<'static, R>, ListError> {
    let page = params.page(default_page_size)?;

    let mut filter = FilterSpec::new();
    if let Some(scope) = R::scope(profile) {
        filter.insert(SCOPE_FILTER, scope);
    }
    for (key, value) in &params.filters {
        filter.insert(key.clone(), R::filter(key, value)?);
    }

    let sort = match &params.sort {
        Some(column) => Some(R::sort(column, params.dir)?),
        None => R::default_sort(),
    };

    let mut query = ListQuery::new(page)
        .with_filter(filter)
        .with_search(R::search(&params.q));
    query.sort = sort;
    Ok(query)
}

pub fn unknown_filter(key: &str) -> ListError {
    ListError::invalid(format!("unknown filter {key:?}"))
}

pub fn unknown_sort(column: &str) -> ListError {
    ListError::invalid(format!("unknown sort column {column:?}"))
}

/// Exact-match filter over a free-text field with a fixed option list.
pub fn parse_listed(key: &str, value: &str, options: &[&str]) -> Result<String, ListError> {
    options
        .iter()
        .find(|o| **o == value)
        .map(|o| o.to_string())
        .ok_or_else(|| ListError::invalid(format!("unknown value {value:?} for filter {key:?}")))
}
