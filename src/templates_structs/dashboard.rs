use std::num::NonZeroUsize;

use askama::Template;
use chrono::NaiveDate;

use crate::loader::LoadState;
use crate::models::list_view::{ListQuery, Page};
use crate::models::listing::{Cell, Listing, StatCard};
use crate::models::role::Role;
use super::PageContext;

/// A short table on a dashboard, linking to the full list when the role has
/// access to it.
pub struct Panel {
    pub title: String,
    pub link: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub error: Option<String>,
    pub empty_message: String,
}

impl Panel {
    /// Runs `query` over the loaded records and keeps its first page.
    pub fn build<R: Listing>(
        title: &str,
        role: Role,
        state: &LoadState<R>,
        query: &ListQuery<'_, R>,
        today: NaiveDate,
        empty_message: &str,
    ) -> Self {
        let view = query.run(state.records());
        Panel {
            title: title.to_string(),
            link: role.can_view(R::SECTION).then(|| role.url_for(R::SECTION)),
            columns: R::columns().iter().map(|c| c.label.to_string()).collect(),
            rows: view.items.iter().map(|r| r.row(today)).collect(),
            error: state.error().map(|e| e.to_string()),
            empty_message: empty_message.to_string(),
        }
    }
}

/// Rows per dashboard panel.
pub const PANEL_PAGE: Page = match NonZeroUsize::new(5) {
    Some(size) => Page::top(size),
    None => Page::top(NonZeroUsize::MIN),
};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub stats: Vec<StatCard>,
    pub panels: Vec<Panel>,
}
