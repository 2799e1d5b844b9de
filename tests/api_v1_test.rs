/// Integration tests for the `/api/v1/{role}/{section}` JSON endpoints.
///
/// Covers paging metadata, clamping, sorting, role scoping, summaries over
/// the full survivor set and the JSON error bodies for 400, 404 and 503.

use campus_portal::models::catalog::STUDENTS;
use campus_portal::models::listing::Listing;
use campus_portal::models::student::Student;
use campus_portal::models::role::{DEMO_STUDENT, DEMO_TEACHER};
use serde_json::Value;

mod common;
use common::{PAGE_SIZE, failing_state, get_json, state, today};

fn items(json: &Value) -> &Vec<Value> {
    json["items"].as_array().expect("items array")
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_admin_students_first_page() {
    let (status, json) = get_json(state(), "/api/v1/admin/students").await;
    assert_eq!(status, 200);

    let total = STUDENTS.len();
    let pages = total.div_ceil(PAGE_SIZE as usize);
    assert_eq!(json["total_matched"], total);
    assert_eq!(json["total_pages"], pages);
    assert_eq!(json["applied_page"], 1);
    assert_eq!(json["page_size"], PAGE_SIZE);
    assert_eq!(items(&json).len(), total.min(PAGE_SIZE as usize));
}

#[actix_web::test]
async fn test_page_beyond_end_clamps_to_last() {
    let (status, json) = get_json(state(), "/api/v1/admin/students?per_page=5&page=9999").await;
    assert_eq!(status, 200);

    let total = STUDENTS.len();
    let last = total.div_ceil(5);
    assert_eq!(json["applied_page"], last);
    assert_eq!(items(&json).len(), total - (last - 1) * 5);
}

#[actix_web::test]
async fn test_page_below_one_and_garbage_page_clamp_to_first() {
    for uri in ["/api/v1/admin/students?page=0", "/api/v1/admin/students?page=-4", "/api/v1/admin/students?page=abc"] {
        let (status, json) = get_json(state(), uri).await;
        assert_eq!(status, 200, "{uri}");
        assert_eq!(json["applied_page"], 1, "{uri}");
    }
}

#[actix_web::test]
async fn test_pages_partition_the_survivors() {
    let mut seen = Vec::new();
    let (_, first) = get_json(state(), "/api/v1/admin/students?per_page=4&sort=id").await;
    let pages = first["total_pages"].as_u64().expect("pages");
    for page in 1..=pages {
        let (_, json) = get_json(state(), &format!("/api/v1/admin/students?per_page=4&sort=id&page={page}")).await;
        seen.extend(items(&json).iter().map(|s| s["id"].as_str().expect("id").to_string()));
    }
    let mut expected: Vec<String> = STUDENTS.iter().map(|s| s.id.to_string()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

// ---------------------------------------------------------------------------
// Sorting, filtering and search
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_sort_descending_by_gpa() {
    let (status, json) = get_json(state(), "/api/v1/admin/students?sort=gpa&dir=desc&per_page=100").await;
    assert_eq!(status, 200);
    let gpas: Vec<f64> = items(&json).iter().map(|s| s["gpa"].as_f64().expect("gpa")).collect();
    assert!(gpas.windows(2).all(|w| w[0] >= w[1]), "not descending: {gpas:?}");
}

#[actix_web::test]
async fn test_filter_and_search_combine() {
    let (status, json) = get_json(state(), "/api/v1/admin/students?program=Computer%20Science&q=son&per_page=100").await;
    assert_eq!(status, 200);
    let expected = Student::fixtures(today())
        .iter()
        .filter(|s| s.program == "Computer Science")
        .filter(|s| [&s.name, &s.id, &s.email, &s.advisor].iter().any(|f| f.to_lowercase().contains("son")))
        .count();
    assert!(expected > 0);
    assert_eq!(json["total_matched"], expected);
    assert!(items(&json).iter().all(|s| s["program"] == "Computer Science"));
}

#[actix_web::test]
async fn test_search_is_case_insensitive() {
    let (_, lower) = get_json(state(), "/api/v1/admin/students?q=alice").await;
    let (_, upper) = get_json(state(), "/api/v1/admin/students?q=ALICE").await;
    assert_eq!(lower["total_matched"], upper["total_matched"]);
    assert!(items(&lower).iter().any(|s| s["name"] == DEMO_STUDENT));
}

#[actix_web::test]
async fn test_all_filter_value_means_no_filter() {
    let (_, all) = get_json(state(), "/api/v1/admin/students?status=all&program=").await;
    let (_, none) = get_json(state(), "/api/v1/admin/students").await;
    assert_eq!(all["total_matched"], none["total_matched"]);
}

#[actix_web::test]
async fn test_repeated_requests_are_identical() {
    let uri = "/api/v1/admin/tickets?status=open&sort=priority&dir=desc&per_page=7&page=2";
    let (_, first) = get_json(state(), uri).await;
    let (_, second) = get_json(state(), uri).await;
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Scoping and summaries
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_student_sees_only_own_fees() {
    let (status, json) = get_json(state(), "/api/v1/student/fees?per_page=100").await;
    assert_eq!(status, 200);
    assert!(json["total_matched"].as_u64().expect("count") > 0);
    assert!(items(&json).iter().all(|f| f["student_name"] == DEMO_STUDENT));
}

#[actix_web::test]
async fn test_teacher_sees_only_advisees() {
    let (_, json) = get_json(state(), "/api/v1/teacher/students?per_page=100").await;
    let advisees = STUDENTS.iter().filter(|s| s.advisor == DEMO_TEACHER).count();
    assert_eq!(json["total_matched"], advisees);
    assert!(items(&json).iter().all(|s| s["advisor"] == DEMO_TEACHER));
}

#[actix_web::test]
async fn test_summary_covers_all_pages() {
    let (_, json) = get_json(state(), "/api/v1/admin/students?per_page=3").await;
    assert_eq!(items(&json).len(), 3);
    assert_eq!(json["summary"]["total"].as_f64(), json["total_matched"].as_f64());
}

#[actix_web::test]
async fn test_summary_of_nothing_is_zero() {
    let (status, json) = get_json(state(), "/api/v1/admin/fees?q=zzzz-no-match").await;
    assert_eq!(status, 200);
    assert_eq!(json["total_matched"], 0);
    assert_eq!(json["total_pages"], 1);
    assert_eq!(json["applied_page"], 1);
    assert_eq!(json["summary"]["total"], 0.0);
    assert_eq!(json["summary"]["outstanding"], 0.0);
    assert_eq!(json["summary"]["collected_rate"], 0.0);
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_non_positive_page_size_is_bad_request() {
    for uri in ["/api/v1/admin/students?per_page=0", "/api/v1/admin/students?per_page=-3", "/api/v1/admin/students?per_page=ten"] {
        let (status, json) = get_json(state(), uri).await;
        assert_eq!(status, 400, "{uri}");
        assert_eq!(json["error"], "Bad Request");
        assert!(json["details"].is_string());
    }
}

#[actix_web::test]
async fn test_unknown_sort_or_filter_value_is_bad_request() {
    let (status, _) = get_json(state(), "/api/v1/admin/students?sort=shoe_size").await;
    assert_eq!(status, 400);
    let (status, _) = get_json(state(), "/api/v1/admin/students?status=expelled").await;
    assert_eq!(status, 400);
}

#[actix_web::test]
async fn test_forbidden_section_and_unknown_role_are_not_found() {
    let (status, json) = get_json(state(), "/api/v1/student/tickets").await;
    assert_eq!(status, 404);
    assert_eq!(json["error"], "Not Found");

    let (status, _) = get_json(state(), "/api/v1/janitor/students").await;
    assert_eq!(status, 404);
}

#[actix_web::test]
async fn test_failed_load_is_service_unavailable() {
    let (status, json) = get_json(failing_state(&["students"]), "/api/v1/admin/students").await;
    assert_eq!(status, 503);
    assert_eq!(json["error"], "Service Unavailable");
    assert!(json["details"].as_str().expect("details").contains("students"));

    // Other sources keep working.
    let (status, _) = get_json(failing_state(&["students"]), "/api/v1/admin/fees").await;
    assert_eq!(status, 200);
}
