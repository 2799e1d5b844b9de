use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Datelike, Local, NaiveDate, Timelike};

use crate::AppState;
use crate::errors::{AppError, render};
use crate::loader::{LoadState, StubLoader};
use crate::models::announcement::Announcement;
use crate::models::assignment::{Assignment, SubmissionStatus};
use crate::models::attendance::AttendanceRecord;
use crate::models::fee::{Fee, FeeStatus};
use crate::models::grade::{self, GradeEntry};
use crate::models::list_view::{ListQuery, Predicate, SortDir, Summary};
use crate::models::listing::display::{decimal, money, percent};
use crate::models::listing::{Listing, SCOPE_FILTER, StatCard};
use crate::models::role::{Profile, Role};
use crate::models::schedule::{ClassSession, Day};
use crate::models::student::{Student, StudentStatus};
use crate::models::ticket::SupportTicket;
use crate::templates_structs::{DashboardTemplate, PANEL_PAGE, PageContext, Panel};

const PANEL_FILTER: &str = "panel";

fn time_greeting(name: &str) -> String {
    let period = match Local::now().hour() {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

/// The profile's slice of `R`, default order, first panel page.
fn scoped<R: Listing>(profile: &Profile) -> ListQuery<'static, R> {
    let mut query = ListQuery::new(PANEL_PAGE);
    if let Some(scope) = R::scope(profile) {
        query.filter.insert(SCOPE_FILTER, scope);
    }
    query.sort = R::default_sort();
    query
}

fn narrowed<R: Listing>(profile: &Profile, predicate: Predicate<'static, R>) -> ListQuery<'static, R> {
    let mut query = scoped::<R>(profile);
    query.filter.insert(PANEL_FILTER, predicate);
    query
}

/// Summary over everything the profile can see in `R`.
fn summarize<R: Listing>(profile: &Profile, state: &LoadState<R>, today: NaiveDate) -> Summary {
    let query = scoped::<R>(profile);
    R::summary(today).evaluate(&query.survivors(state.records()))
}

fn todays_classes(today: NaiveDate) -> Predicate<'static, ClassSession> {
    let day = Day::of(today.weekday());
    Box::new(move |s: &ClassSession| Some(s.day) == day)
}

fn unpaid() -> Predicate<'static, Fee> {
    Box::new(|f: &Fee| !f.is_paid())
}

fn open_work() -> Predicate<'static, Assignment> {
    Box::new(|a: &Assignment| a.is_open())
}

/// Stat card value, or a dash when its source failed to load.
fn stat<R>(state: &LoadState<R>, value: impl FnOnce() -> String) -> String {
    if state.error().is_some() { "-".to_string() } else { value() }
}

async fn student(loader: &StubLoader, profile: &Profile, today: NaiveDate) -> (Vec<StatCard>, Vec<Panel>) {
    let role = profile.role;
    let (assignments, schedule, fees, grades, announcements) = tokio::join!(
        loader.load_listing::<Assignment>(today),
        loader.load_listing::<ClassSession>(today),
        loader.load_listing::<Fee>(today),
        loader.load_listing::<GradeEntry>(today),
        loader.load_listing::<Announcement>(today),
    );

    let work = summarize(profile, &assignments, today);
    let classes = summarize(profile, &schedule, today);
    let billing = summarize(profile, &fees, today);
    let marks = summarize(profile, &grades, today);

    let stats = vec![
        StatCard::new("Pending assignments", stat(&assignments, || work.count("pending").to_string()), "warning"),
        StatCard::new("Due this week", stat(&assignments, || work.count("due_this_week").to_string()), "info"),
        StatCard::new("Classes today", stat(&schedule, || classes.count("today").to_string()), "primary"),
        StatCard::new("Outstanding fees", stat(&fees, || money(billing.value("outstanding"))), "danger"),
        StatCard::new("GPA", stat(&grades, || decimal(grade::gpa(&marks), 2)), "success"),
    ];

    let panels = vec![
        Panel::build(
            "Upcoming assignments",
            role,
            &assignments,
            &narrowed(profile, open_work()),
            today,
            "Nothing due. Enjoy the break.",
        ),
        Panel::build(
            "Today's classes",
            role,
            &schedule,
            &narrowed(profile, todays_classes(today)),
            today,
            "No classes today.",
        ),
        Panel::build("Fees due", role, &fees, &narrowed(profile, unpaid()), today, "All fees are paid."),
        Panel::build(
            "Latest announcements",
            role,
            &announcements,
            &scoped(profile),
            today,
            "No announcements.",
        ),
    ];
    (stats, panels)
}

async fn parent(loader: &StubLoader, profile: &Profile, today: NaiveDate) -> (Vec<StatCard>, Vec<Panel>) {
    let role = profile.role;
    let (attendance, grades, fees, assignments, announcements) = tokio::join!(
        loader.load_listing::<AttendanceRecord>(today),
        loader.load_listing::<GradeEntry>(today),
        loader.load_listing::<Fee>(today),
        loader.load_listing::<Assignment>(today),
        loader.load_listing::<Announcement>(today),
    );

    let presence = summarize(profile, &attendance, today);
    let marks = summarize(profile, &grades, today);
    let billing = summarize(profile, &fees, today);
    let work = summarize(profile, &assignments, today);

    let stats = vec![
        StatCard::new("Attendance", stat(&attendance, || percent(presence.value("attendance_rate"))), "success"),
        StatCard::new("GPA", stat(&grades, || decimal(grade::gpa(&marks), 2)), "primary"),
        StatCard::new("Outstanding fees", stat(&fees, || money(billing.value("outstanding"))), "warning"),
        StatCard::new("Overdue assignments", stat(&assignments, || work.count("overdue").to_string()), "danger"),
    ];

    let panels = vec![
        Panel::build("Recent attendance", role, &attendance, &scoped(profile), today, "No sessions recorded."),
        Panel::build("Fees due", role, &fees, &narrowed(profile, unpaid()), today, "All fees are paid."),
        Panel::build(
            "Upcoming assignments",
            role,
            &assignments,
            &narrowed(profile, open_work()),
            today,
            "Nothing due.",
        ),
        Panel::build("Announcements", role, &announcements, &scoped(profile), today, "No announcements."),
    ];
    (stats, panels)
}

async fn teacher(loader: &StubLoader, profile: &Profile, today: NaiveDate) -> (Vec<StatCard>, Vec<Panel>) {
    let role = profile.role;
    let (schedule, students, assignments, attendance, announcements) = tokio::join!(
        loader.load_listing::<ClassSession>(today),
        loader.load_listing::<Student>(today),
        loader.load_listing::<Assignment>(today),
        loader.load_listing::<AttendanceRecord>(today),
        loader.load_listing::<Announcement>(today),
    );

    let classes = summarize(profile, &schedule, today);
    let advisees = summarize(profile, &students, today);
    let work = summarize(profile, &assignments, today);
    let presence = summarize(profile, &attendance, today);

    let stats = vec![
        StatCard::new("Classes today", stat(&schedule, || classes.count("today").to_string()), "primary"),
        StatCard::new("Advisees", stat(&students, || advisees.count("total").to_string()), "info"),
        StatCard::new("To grade", stat(&assignments, || work.count("submitted").to_string()), "warning"),
        StatCard::new("Attendance", stat(&attendance, || percent(presence.value("attendance_rate"))), "success"),
    ];

    let mut to_grade = narrowed(profile, Box::new(|a: &Assignment| a.status == SubmissionStatus::Submitted));
    to_grade.sort = Assignment::sort("due", SortDir::Asc).ok();

    let panels = vec![
        Panel::build(
            "Today's classes",
            role,
            &schedule,
            &narrowed(profile, todays_classes(today)),
            today,
            "No classes today.",
        ),
        Panel::build("Submissions to grade", role, &assignments, &to_grade, today, "All caught up."),
        Panel::build(
            "Advisees on probation",
            role,
            &students,
            &narrowed(profile, Box::new(|s: &Student| s.status == StudentStatus::Probation)),
            today,
            "No advisees on probation.",
        ),
        Panel::build("Announcements", role, &announcements, &scoped(profile), today, "No announcements."),
    ];
    (stats, panels)
}

async fn admin(loader: &StubLoader, profile: &Profile, today: NaiveDate) -> (Vec<StatCard>, Vec<Panel>) {
    let role = profile.role;
    let (students, fees, tickets, attendance, announcements) = tokio::join!(
        loader.load_listing::<Student>(today),
        loader.load_listing::<Fee>(today),
        loader.load_listing::<SupportTicket>(today),
        loader.load_listing::<AttendanceRecord>(today),
        loader.load_listing::<Announcement>(today),
    );

    let enrolled = summarize(profile, &students, today);
    let billing = summarize(profile, &fees, today);
    let desk = summarize(profile, &tickets, today);
    let presence = summarize(profile, &attendance, today);

    let stats = vec![
        StatCard::new("Students", stat(&students, || enrolled.count("total").to_string()), "primary"),
        StatCard::new("Outstanding fees", stat(&fees, || money(billing.value("outstanding"))), "warning"),
        StatCard::new("Open tickets", stat(&tickets, || desk.count("open").to_string()), "danger"),
        StatCard::new("Attendance", stat(&attendance, || percent(presence.value("attendance_rate"))), "success"),
    ];

    let mut open_tickets = narrowed(profile, Box::new(|t: &SupportTicket| !t.status.is_done()));
    open_tickets.sort = SupportTicket::sort("priority", SortDir::Desc).ok();

    let panels = vec![
        Panel::build("Open tickets", role, &tickets, &open_tickets, today, "The queue is empty."),
        Panel::build(
            "Overdue fees",
            role,
            &fees,
            &narrowed(profile, Box::new(|f: &Fee| f.status == FeeStatus::Overdue)),
            today,
            "No overdue fees.",
        ),
        Panel::build(
            "Students on probation",
            role,
            &students,
            &narrowed(profile, Box::new(|s: &Student| s.status == StudentStatus::Probation)),
            today,
            "No students on probation.",
        ),
        Panel::build("Announcements", role, &announcements, &scoped(profile), today, "No announcements."),
    ];
    (stats, panels)
}

/// GET /{role}
pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let role = Role::from_slug(&path).ok_or(AppError::NotFound)?;
    let profile = Profile::demo(role);
    let today = state.today();

    let (stats, panels) = match role {
        Role::Student => student(&state.loader, &profile, today).await,
        Role::Parent => parent(&state.loader, &profile, today).await,
        Role::Teacher => teacher(&state.loader, &profile, today).await,
        Role::Admin => admin(&state.loader, &profile, today).await,
    };

    let ctx = PageContext::build(&state.config.app_name, &profile, req.path(), "Dashboard", today);
    let tmpl = DashboardTemplate {
        greeting: time_greeting(&profile.display_name),
        ctx,
        stats,
        panels,
    };
    render(tmpl)
}
