//! Shared test infrastructure for the HTTP integration tests.
//!
//! - `today()` - the date every fixture is anchored to
//! - `state()` / `failing_state()` - app state with no load delay
//! - `get()` / `get_json()` - one request against the full route table

#![allow(dead_code)]

use std::time::Duration;

use actix_web::{App, test, web};
use chrono::NaiveDate;

use campus_portal::AppState;
use campus_portal::config::AppConfig;
use campus_portal::handlers;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// A Tuesday.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

pub const PAGE_SIZE: i64 = 10;

// ============================================================================
// STATE SETUP
// ============================================================================

pub fn config(failing: &[&str]) -> AppConfig {
    AppConfig {
        app_name: "Test Portal".to_string(),
        page_size: PAGE_SIZE,
        load_delay: Duration::ZERO,
        failing_sources: failing.iter().map(|s| s.to_string()).collect(),
        today: Some(today()),
        ..AppConfig::default()
    }
}

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(config(&[])))
}

pub fn failing_state(sources: &[&str]) -> web::Data<AppState> {
    web::Data::new(AppState::new(config(sources)))
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

/// Status and body of a GET against a fresh app.
pub async fn get(state: web::Data<AppState>, uri: &str) -> (u16, String) {
    let app = test::init_service(App::new().app_data(state).configure(handlers::configure)).await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
}

pub async fn get_json(state: web::Data<AppState>, uri: &str) -> (u16, serde_json::Value) {
    let (status, body) = get(state, uri).await;
    let json = serde_json::from_str(&body).unwrap_or_else(|e| panic!("{uri} returned non-JSON ({e}): {body}"));
    (status, json)
}
