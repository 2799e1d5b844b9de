//! Stand-in data sources. Every table is backed by an in-memory fixture
//! that arrives after a simulated latency, and any source can be configured
//! to fail so the error paths stay reachable.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::models::listing::Listing;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadError {
    pub source: String,
    pub message: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.source, self.message)
    }
}

impl std::error::Error for LoadError {}

/// Where a page's collection stands. Rendering reads `records()`, which is
/// empty unless loaded.
#[derive(Debug, Clone)]
pub enum LoadState<R> {
    Loading,
    Loaded(Vec<R>),
    Failed(LoadError),
}

impl<R> LoadState<R> {
    pub fn records(&self) -> &[R] {
        match self {
            LoadState::Loaded(records) => records,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

impl<R> From<Result<Vec<R>, LoadError>> for LoadState<R> {
    fn from(result: Result<Vec<R>, LoadError>) -> Self {
        match result {
            Ok(records) => LoadState::Loaded(records),
            Err(e) => LoadState::Failed(e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StubLoader {
    delay: Duration,
    failing: HashSet<String>,
}

impl StubLoader {
    pub fn new<S: Into<String>>(delay: Duration, failing: impl IntoIterator<Item = S>) -> Self {
        Self {
            delay,
            failing: failing.into_iter().map(Into::into).collect(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn fails(&self, source: &str) -> bool {
        self.failing.contains(source)
    }

    pub async fn load<R, F>(&self, source: &str, fetch: F) -> Result<Vec<R>, LoadError>
    where
        F: FnOnce() -> Vec<R>,
    {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fails(source) {
            log::warn!("Source {source} configured to fail");
            return Err(LoadError {
                source: source.to_string(),
                message: "the service is unavailable, try again later".to_string(),
            });
        }
        let records = fetch();
        log::debug!("Loaded {} records from {source}", records.len());
        Ok(records)
    }

    pub async fn load_listing<R: Listing>(&self, today: NaiveDate) -> LoadState<R> {
        self.load(R::SOURCE, || R::fixtures(today)).await.into()
    }
}
