pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod templates_structs;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::loader::StubLoader;

/// Shared, read-only application state. Every request builds its own list
/// pipeline from it; nothing here changes after startup.
pub struct AppState {
    pub config: AppConfig,
    pub loader: StubLoader,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let loader = config.loader();
        Self { config, loader }
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }
}
