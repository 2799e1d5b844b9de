// src/models/list_view/params.rs
//
// User-driven list state as it arrives in a query string. Parsing is lenient
// for the page number (garbage falls back to 1) and strict for the page size,
// which is handed to `Page::new` unmodified.

use std::collections::{BTreeMap, HashMap};

use super::{ListError, Page, SortDir};

/// Selecting this value in a filter dropdown means "no filter".
pub const ANY: &str = "all";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub q: String,
    pub page: i64,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub dir: SortDir,
    pub filters: BTreeMap<String, String>,
}

impl ListParams {
    /// `filter_keys` are the filter names the page declares; anything else in
    /// the query is ignored.
    pub fn from_query(query: &HashMap<String, String>, filter_keys: &[&str]) -> Result<Self, ListError> {
        let page = query
            .get("page")
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);

        let per_page = match query.get("per_page").map(|s| s.trim()).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| ListError::invalid(format!("per_page must be an integer, got {raw:?}")))?,
            ),
            None => None,
        };

        let sort = query
            .get("sort")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let filters = filter_keys
            .iter()
            .filter_map(|key| {
                let value = query.get(*key)?.trim();
                if value.is_empty() || value == ANY {
                    None
                } else {
                    Some((key.to_string(), value.to_string()))
                }
            })
            .collect();

        Ok(ListParams {
            q: query.get("q").cloned().unwrap_or_default(),
            page,
            per_page,
            sort,
            dir: SortDir::from_param(query.get("dir").map(String::as_str)),
            filters,
        })
    }

    pub fn page(&self, default_size: i64) -> Result<Page, ListError> {
        Page::new(self.page, self.per_page.unwrap_or(default_size))
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Query pairs that reproduce this state, minus the page number.
    fn base_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push(("q".to_string(), self.q.clone()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
            pairs.push(("dir".to_string(), self.dir.as_str().to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs
    }

    fn encode(pairs: &[(String, String)]) -> String {
        serde_urlencoded::to_string(pairs).unwrap_or_default()
    }

    pub fn query_for_page(&self, page: usize) -> String {
        let mut pairs = self.base_pairs();
        pairs.push(("page".to_string(), page.to_string()));
        Self::encode(&pairs)
    }

    /// Clicking the active column flips direction; any other column starts
    /// ascending. Sorting always returns to page 1.
    pub fn query_for_sort(&self, column: &str) -> String {
        let dir = if self.sort.as_deref() == Some(column) { self.dir.toggled() } else { SortDir::Asc };
        let mut next = self.clone();
        next.sort = Some(column.to_string());
        next.dir = dir;
        Self::encode(&next.base_pairs())
    }
}
