//! In-memory list pipeline shared by every portal table.
//!
//! A `ListQuery` is built fresh per request from immutable parts
//! (`FilterSpec`, `SearchSpec`, optional `SortSpec`, `Page`) and run against
//! a borrowed slice of records. Steps always execute in the same order:
//! filter, search, stable sort, paginate. Summaries are evaluated over the
//! survivors of filter + search, never over the current page only.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

pub mod due_date;
pub mod pagination;
pub mod params;
pub mod summary;

pub use due_date::DueDateClassifier;
pub use pagination::{Page, ViewResult};
pub use params::ListParams;
pub use summary::{Summary, SummarySpec};

#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    InvalidArgument(String),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ListError {}

impl ListError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ListError::InvalidArgument(msg.into())
    }
}

pub type Predicate<'a, R> = Box<dyn Fn(&R) -> bool + 'a>;
pub type Extractor<'a, R> = Box<dyn for<'r> Fn(&'r R) -> &'r str + 'a>;
pub type Comparator<'a, R> = Box<dyn Fn(&R, &R) -> Ordering + 'a>;

// ---------- Filter ----------

/// Named predicates, all of which must hold. Empty matches every record.
pub struct FilterSpec<'a, R> {
    predicates: Vec<(String, Predicate<'a, R>)>,
}

impl<R> Default for FilterSpec<'_, R> {
    fn default() -> Self {
        Self { predicates: Vec::new() }
    }
}

impl<'a, R> FilterSpec<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, predicate: impl Fn(&R) -> bool + 'a) -> Self {
        self.insert(name, Box::new(predicate));
        self
    }

    /// Insert under `name`, replacing any predicate already registered there.
    pub fn insert(&mut self, name: impl Into<String>, predicate: Predicate<'a, R>) {
        let name = name.into();
        match self.predicates.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = predicate,
            None => self.predicates.push((name, predicate)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.iter().map(|(n, _)| n.as_str())
    }

    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|(_, p)| p(record))
    }
}

// ---------- Search ----------

/// Case-insensitive substring search over caller-supplied text fields.
pub struct SearchSpec<'a, R> {
    term: String,
    needle: String,
    extractors: Vec<Extractor<'a, R>>,
}

impl<R> Default for SearchSpec<'_, R> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<'a, R> SearchSpec<'a, R> {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let needle = term.to_lowercase();
        Self { term, needle, extractors: Vec::new() }
    }

    pub fn field(mut self, extractor: impl Fn(&R) -> &str + 'a) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Empty or whitespace-only terms match everything.
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }

    /// A non-blank term with no extractors matches nothing.
    pub fn matches(&self, record: &R) -> bool {
        if self.is_blank() {
            return true;
        }
        self.extractors
            .iter()
            .any(|extract| extract(record).to_lowercase().contains(&self.needle))
    }
}

// ---------- Sort ----------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Anything other than `desc` sorts ascending.
    pub fn from_param(dir: Option<&str>) -> Self {
        if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// Ordering for the survivor set. Sorting is stable in both directions:
/// records comparing equal keep their input order.
pub struct SortSpec<'a, R> {
    compare: Comparator<'a, R>,
    dir: SortDir,
}

impl<'a, R> SortSpec<'a, R> {
    pub fn by(compare: impl Fn(&R, &R) -> Ordering + 'a, dir: SortDir) -> Self {
        Self { compare: Box::new(compare), dir }
    }

    pub fn by_key<K: Ord>(key: impl Fn(&R) -> K + 'a, dir: SortDir) -> Self {
        Self::by(move |a, b| key(a).cmp(&key(b)), dir)
    }

    /// Float keys are compared with `total_cmp`, so NaN sorts last ascending.
    pub fn by_float(key: impl Fn(&R) -> f64 + 'a, dir: SortDir) -> Self {
        Self::by(move |a, b| key(a).total_cmp(&key(b)), dir)
    }

    pub fn dir(&self) -> SortDir {
        self.dir
    }

    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }
}

// ---------- Query ----------

/// One request's worth of list parameters. Holds no state between runs.
pub struct ListQuery<'a, R> {
    pub filter: FilterSpec<'a, R>,
    pub search: SearchSpec<'a, R>,
    pub sort: Option<SortSpec<'a, R>>,
    pub page: Page,
}

impl<'a, R> ListQuery<'a, R> {
    pub fn new(page: Page) -> Self {
        Self {
            filter: FilterSpec::new(),
            search: SearchSpec::default(),
            sort: None,
            page,
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec<'a, R>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_search(mut self, search: SearchSpec<'a, R>) -> Self {
        self.search = search;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec<'a, R>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Filter + search, in input order.
    pub fn survivors<'r>(&self, records: &'r [R]) -> Vec<&'r R> {
        records
            .iter()
            .filter(|r| self.filter.matches(r))
            .filter(|r| self.search.matches(r))
            .collect()
    }

    pub fn run<'r>(&self, records: &'r [R]) -> ViewResult<'r, R> {
        let survivors = self.sorted(self.survivors(records));
        pagination::paginate(survivors, self.page)
    }

    /// Like `run`, plus `spec` evaluated over the full survivor set.
    pub fn run_with_summary<'r>(
        &self,
        records: &'r [R],
        spec: &SummarySpec<'_, R>,
    ) -> (ViewResult<'r, R>, Summary) {
        let survivors = self.survivors(records);
        let summary = spec.evaluate(&survivors);
        let survivors = self.sorted(survivors);
        (pagination::paginate(survivors, self.page), summary)
    }

    fn sorted<'r>(&self, mut survivors: Vec<&'r R>) -> Vec<&'r R> {
        if let Some(sort) = &self.sort {
            // slice::sort_by is stable
            survivors.sort_by(|a, b| sort.compare(a, b));
        }
        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        status: &'static str,
        score: i64,
    }

    fn row(name: &'static str, status: &'static str, score: i64) -> Row {
        Row { name, status, score }
    }

    fn roster() -> Vec<Row> {
        vec![
            row("Alice Johnson", "present", 90),
            row("Bob Martinez", "absent", 75),
            row("Carol Nguyen", "present", 90),
            row("David Kim", "late", 60),
            row("Emma Wilson", "present", 75),
        ]
    }

    fn names(items: &[&Row]) -> Vec<&'static str> {
        items.iter().map(|r| r.name).collect()
    }

    fn page(n: i64, size: i64) -> Page {
        Page::new(n, size).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = roster();
        let view = ListQuery::new(page(1, 100)).run(&records);
        assert_eq!(view.total_matched, records.len());
        assert_eq!(names(&view.items), names(&records.iter().collect::<Vec<_>>()));
    }

    #[test]
    fn predicates_are_anded() {
        let records = roster();
        let filter = FilterSpec::new()
            .with("status", |r: &Row| r.status == "present")
            .with("score", |r: &Row| r.score >= 80);
        let view = ListQuery::new(page(1, 10)).with_filter(filter).run(&records);
        assert_eq!(names(&view.items), vec!["Alice Johnson", "Carol Nguyen"]);
    }

    #[test]
    fn inserting_same_name_replaces_predicate() {
        let mut filter = FilterSpec::new().with("status", |r: &Row| r.status == "present");
        filter.insert("status", Box::new(|r: &Row| r.status == "absent"));
        assert_eq!(filter.len(), 1);
        let records = roster();
        let view = ListQuery::new(page(1, 10)).with_filter(filter).run(&records);
        assert_eq!(names(&view.items), vec!["Bob Martinez"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let records = roster();
        let search = SearchSpec::new("alice").field(|r: &Row| r.name);
        let view = ListQuery::new(page(1, 10)).with_search(search).run(&records);
        assert_eq!(names(&view.items), vec!["Alice Johnson"]);

        let search = SearchSpec::new("JOHN").field(|r: &Row| r.name);
        let view = ListQuery::new(page(1, 10)).with_search(search).run(&records);
        assert_eq!(names(&view.items), vec!["Alice Johnson"]);
    }

    #[test]
    fn search_matches_any_extractor() {
        let records = roster();
        let search = SearchSpec::new("LATE")
            .field(|r: &Row| r.name)
            .field(|r: &Row| r.status);
        let view = ListQuery::new(page(1, 10)).with_search(search).run(&records);
        assert_eq!(names(&view.items), vec!["David Kim"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let records = roster();
        let search = SearchSpec::new("   ").field(|r: &Row| r.name);
        assert!(search.is_blank());
        let view = ListQuery::new(page(1, 10)).with_search(search).run(&records);
        assert_eq!(view.total_matched, records.len());
    }

    #[test]
    fn search_without_extractors_matches_nothing() {
        let records = roster();
        let view = ListQuery::new(page(1, 10))
            .with_search(SearchSpec::new("alice"))
            .run(&records);
        assert_eq!(view.total_matched, 0);
        assert!(view.items.is_empty());
    }

    #[test]
    fn sort_is_stable_ascending() {
        let records = roster();
        let view = ListQuery::new(page(1, 10))
            .with_sort(SortSpec::by_key(|r: &Row| r.score, SortDir::Asc))
            .run(&records);
        assert_eq!(
            names(&view.items),
            vec!["David Kim", "Bob Martinez", "Emma Wilson", "Alice Johnson", "Carol Nguyen"]
        );
    }

    #[test]
    fn sort_is_stable_descending() {
        let records = roster();
        let view = ListQuery::new(page(1, 10))
            .with_sort(SortSpec::by_key(|r: &Row| r.score, SortDir::Desc))
            .run(&records);
        assert_eq!(
            names(&view.items),
            vec!["Alice Johnson", "Carol Nguyen", "Bob Martinez", "Emma Wilson", "David Kim"]
        );
    }

    #[test]
    fn float_sort_uses_total_order() {
        let values = [2.5_f64, -1.0, 10.0, 0.0];
        let view = ListQuery::new(page(1, 10))
            .with_sort(SortSpec::by_float(|v: &f64| *v, SortDir::Asc))
            .run(&values);
        let got: Vec<f64> = view.items.iter().map(|v| **v).collect();
        assert_eq!(got, vec![-1.0, 0.0, 2.5, 10.0]);
    }

    #[test]
    fn sort_dir_params() {
        assert_eq!(SortDir::from_param(Some("desc")), SortDir::Desc);
        assert_eq!(SortDir::from_param(Some("DESC")), SortDir::Asc);
        assert_eq!(SortDir::from_param(None), SortDir::Asc);
        assert_eq!(SortDir::Asc.toggled(), SortDir::Desc);
        assert_eq!(SortDir::Desc.as_str(), "desc");
    }

    #[test]
    fn present_filter_keeps_input_order() {
        let records = vec![
            row("Alice", "present", 0),
            row("Bob", "absent", 0),
            row("Carol", "present", 0),
        ];
        let query = ListQuery::new(page(1, 10))
            .with_filter(FilterSpec::new().with("status", |r: &Row| r.status == "present"));
        let spec = SummarySpec::new().count_where("present", |r: &Row| r.status == "present");

        let (view, summary) = query.run_with_summary(&records, &spec);
        assert_eq!(names(&view.items), vec!["Alice", "Carol"]);
        assert_eq!(view.total_matched, 2);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.applied_page, 1);
        assert_eq!(summary.get("present"), Some(2.0));

        // Unfiltered survivor stage counts the same two present records.
        let unfiltered = ListQuery::new(page(1, 10)).run_with_summary(&records, &spec).1;
        assert_eq!(unfiltered.get("present"), Some(2.0));
    }

    #[test]
    fn running_twice_gives_identical_output() {
        let records = roster();
        let query = ListQuery::new(page(2, 2))
            .with_filter(FilterSpec::new().with("score", |r: &Row| r.score > 50))
            .with_search(SearchSpec::new("a").field(|r: &Row| r.name))
            .with_sort(SortSpec::by_key(|r: &Row| r.name, SortDir::Desc));
        let spec = SummarySpec::new().average_of("avg", |r: &Row| r.score as f64);

        let first = query.run_with_summary(&records, &spec);
        let second = query.run_with_summary(&records, &spec);
        assert_eq!(first.0.items, second.0.items);
        assert_eq!(first.0.total_matched, second.0.total_matched);
        assert_eq!(first.1, second.1);
        assert_eq!(records, roster(), "input must not be mutated");
    }

    #[test]
    fn summary_ignores_current_page() {
        let records: Vec<Row> = (0..10)
            .map(|i| row("x", if i % 3 == 0 { "absent" } else { "present" }, i))
            .collect();
        let spec = SummarySpec::new().count_where("present", |r: &Row| r.status == "present");

        let counts: Vec<Option<f64>> = (1..=4)
            .map(|n| ListQuery::new(page(n, 3)).run_with_summary(&records, &spec).1.get("present"))
            .collect();
        assert!(counts.iter().all(|c| *c == Some(6.0)), "got {counts:?}");
    }

    #[test]
    fn empty_input_is_valid() {
        let records: Vec<Row> = Vec::new();
        let view = ListQuery::new(page(5, 10)).run(&records);
        assert!(view.items.is_empty());
        assert_eq!(view.total_matched, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.applied_page, 1);
    }

    #[test]
    fn list_error_display() {
        let err = ListError::invalid("page size must be positive");
        assert_eq!(err.to_string(), "Invalid argument: page size must be positive");
    }
}
