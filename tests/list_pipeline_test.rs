/// Pipeline properties checked against every portal dataset, through the
/// same `Listing` + `ListQuery` path the handlers use.

use campus_portal::models::announcement::Announcement;
use campus_portal::models::assignment::Assignment;
use campus_portal::models::attendance::AttendanceRecord;
use campus_portal::models::career::JobPosting;
use campus_portal::models::fee::Fee;
use campus_portal::models::grade::GradeEntry;
use campus_portal::models::list_view::{DueDateClassifier, ListError, ListQuery, Page};
use campus_portal::models::listing::Listing;
use campus_portal::models::role::{Profile, Role};
use campus_portal::models::schedule::ClassSession;
use campus_portal::models::student::Student;
use campus_portal::models::ticket::SupportTicket;

mod common;
use common::today;

fn unscoped<R: Listing>(page: Page) -> ListQuery<'static, R> {
    let mut query = ListQuery::new(page);
    query.sort = R::default_sort();
    query
}

fn check_dataset<R: Listing>() {
    let records = R::fixtures(today());
    assert!(!records.is_empty(), "{} has no fixtures", R::SOURCE);

    // No filter, no search: everything survives.
    let everything = unscoped::<R>(Page::first(records.len() as i64).expect("page")).run(&records);
    assert_eq!(everything.total_matched, records.len(), "{}", R::SOURCE);
    assert_eq!(everything.total_pages, 1);

    // Pages of 3 cover the sorted survivors exactly once, in order.
    let first = unscoped::<R>(Page::first(3).expect("page")).run(&records);
    let mut concatenated = Vec::new();
    for n in 1..=first.total_pages {
        let view = unscoped::<R>(Page::new(n as i64, 3).expect("page")).run(&records);
        assert_eq!(view.applied_page, n);
        concatenated.extend(view.items);
    }
    assert_eq!(concatenated.len(), everything.items.len(), "{}", R::SOURCE);
    assert!(
        concatenated.iter().zip(&everything.items).all(|(a, b)| std::ptr::eq(*a, *b)),
        "{} pages out of order",
        R::SOURCE
    );

    // Far-out page numbers clamp to the last page.
    let clamped = unscoped::<R>(Page::new(9999, 3).expect("page")).run(&records);
    assert_eq!(clamped.applied_page, first.total_pages);
    assert!(!clamped.items.is_empty());

    // The summary does not depend on the requested page.
    let spec = R::summary(today());
    let (_, on_first) = unscoped::<R>(Page::new(1, 3).expect("page")).run_with_summary(&records, &spec);
    let (_, on_last) = unscoped::<R>(Page::new(9999, 3).expect("page")).run_with_summary(&records, &spec);
    assert_eq!(on_first, on_last, "{}", R::SOURCE);

    // Every summary value is finite even when nothing survives.
    let mut nothing = unscoped::<R>(Page::first(3).expect("page"));
    nothing.search = R::search("\u{1F50E} no record has this");
    let (view, empty) = nothing.run_with_summary(&records, &spec);
    assert_eq!(view.total_matched, 0);
    assert_eq!(view.total_pages, 1);
    assert!(empty.iter().all(|(_, v)| v == 0.0), "{}: {empty:?}", R::SOURCE);

    // One row cell per column, for every role that can open the section.
    let columns = R::columns().len();
    assert!(records.iter().all(|r| r.row(today()).len() == columns), "{}", R::SOURCE);
    for role in Role::ALL.iter().filter(|r| r.can_view(R::SECTION)) {
        let mut scoped = unscoped::<R>(Page::first(10).expect("page"));
        if let Some(scope) = R::scope(&Profile::demo(*role)) {
            scoped.filter.insert("scope", scope);
        }
        assert!(scoped.run(&records).total_matched <= records.len());
    }
}

#[test]
fn test_students() {
    check_dataset::<Student>();
}

#[test]
fn test_attendance() {
    check_dataset::<AttendanceRecord>();
}

#[test]
fn test_fees() {
    check_dataset::<Fee>();
}

#[test]
fn test_assignments() {
    check_dataset::<Assignment>();
}

#[test]
fn test_grades() {
    check_dataset::<GradeEntry>();
}

#[test]
fn test_schedule() {
    check_dataset::<ClassSession>();
}

#[test]
fn test_announcements() {
    check_dataset::<Announcement>();
}

#[test]
fn test_careers() {
    check_dataset::<JobPosting>();
}

#[test]
fn test_tickets() {
    check_dataset::<SupportTicket>();
}

#[test]
fn test_non_positive_page_size_rejected() {
    for size in [0, -1, i64::MIN] {
        assert!(matches!(Page::new(1, size), Err(ListError::InvalidArgument(_))));
    }
}

#[test]
fn test_classifier_boundaries() {
    let classifier = DueDateClassifier::new([(0, "overdue"), (2, "urgent")], "normal").expect("ascending");
    assert_eq!(classifier.classify_days(0), "overdue");
    assert_eq!(classifier.classify_days(2), "urgent");
    assert_eq!(classifier.classify_days(3), "normal");
    assert!(DueDateClassifier::new([(5, "soon"), (1, "urgent")], "normal").is_err());
}
