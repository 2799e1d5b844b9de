pub mod api_v1;
pub mod dashboard;
pub mod home;
pub mod listing;

use actix_web::web;
use serde::Serialize;

use crate::errors::not_found_page;
use crate::models::announcement::Announcement;
use crate::models::assignment::Assignment;
use crate::models::attendance::AttendanceRecord;
use crate::models::career::JobPosting;
use crate::models::fee::Fee;
use crate::models::grade::GradeEntry;
use crate::models::listing::Listing;
use crate::models::schedule::ClassSession;
use crate::models::student::Student;
use crate::models::ticket::SupportTicket;

/// One HTML page and one JSON endpoint per dataset.
fn dataset<R: Listing + Serialize>(cfg: &mut web::ServiceConfig) {
    let slug = R::SECTION.slug();
    cfg.route(&format!("/api/v1/{{role}}/{slug}"), web::get().to(api_v1::lists::list::<R>));
    cfg.route(&format!("/{{role}}/{slug}"), web::get().to(listing::page::<R>));
}

/// Full route table, shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::index));
    dataset::<Student>(cfg);
    dataset::<AttendanceRecord>(cfg);
    dataset::<Fee>(cfg);
    dataset::<Assignment>(cfg);
    dataset::<GradeEntry>(cfg);
    dataset::<ClassSession>(cfg);
    dataset::<Announcement>(cfg);
    dataset::<JobPosting>(cfg);
    dataset::<SupportTicket>(cfg);
    cfg.route("/{role}", web::get().to(dashboard::index));
    // Must stay last
    cfg.default_service(web::to(|| async { not_found_page() }));
}
