use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::loader::StubLoader;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "Campus Portal";
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_LOAD_DELAY_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub app_name: String,
    pub page_size: i64,
    pub load_delay: Duration,
    pub failing_sources: Vec<String>,
    /// Pinned "today"; `None` follows the local clock.
    pub today: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            load_delay: Duration::from_millis(DEFAULT_LOAD_DELAY_MS),
            failing_sources: Vec::new(),
            today: None,
        }
    }
}

impl AppConfig {
    /// Reads `PORTAL_*` variables. Call `dotenvy::dotenv()` first to pick up
    /// a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Invalid values are logged and replaced by their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(bind) = lookup("PORTAL_BIND").filter(|v| !v.trim().is_empty()) {
            config.bind = bind.trim().to_string();
        }
        if let Some(name) = lookup("PORTAL_APP_NAME").filter(|v| !v.trim().is_empty()) {
            config.app_name = name.trim().to_string();
        }
        if let Some(raw) = lookup("PORTAL_PAGE_SIZE") {
            match raw.trim().parse::<i64>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => log::warn!("PORTAL_PAGE_SIZE={raw:?} is not a positive integer, using {DEFAULT_PAGE_SIZE}"),
            }
        }
        if let Some(raw) = lookup("PORTAL_LOAD_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.load_delay = Duration::from_millis(ms),
                Err(_) => log::warn!("PORTAL_LOAD_DELAY_MS={raw:?} is invalid, using {DEFAULT_LOAD_DELAY_MS}"),
            }
        }
        if let Some(raw) = lookup("PORTAL_FAIL_SOURCES") {
            config.failing_sources = raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(raw) = lookup("PORTAL_TODAY") {
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => config.today = Some(date),
                Err(e) => log::warn!("PORTAL_TODAY={raw:?} is not YYYY-MM-DD ({e}), following the clock"),
            }
        }

        config
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn loader(&self) -> StubLoader {
        StubLoader::new(self.load_delay, self.failing_sources.iter().cloned())
    }
}
