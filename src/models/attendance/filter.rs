// src/models/attendance/filter.rs

use chrono::NaiveDate;

use crate::models::catalog::{course_codes, courses_taught_by};
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::listing::display::{percent, short_date};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

use super::types::{AttendanceRecord, AttendanceStatus};

impl Listing for AttendanceRecord {
    const SECTION: Section = Section::Attendance;
    const SOURCE: &'static str = "attendance";
    const TITLE: &'static str = "Attendance";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        super::data::dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::listed("course", "Course", &course_codes()),
            FilterField::new("status", "Status", AttendanceStatus::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "course" => {
                let code = parse_listed(key, value, &course_codes())?;
                Ok(Box::new(move |r: &AttendanceRecord| r.course_code == code))
            }
            "status" => {
                let status: AttendanceStatus = parse_choice(key, value)?;
                Ok(Box::new(move |r: &AttendanceRecord| r.status == status))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|r: &AttendanceRecord| r.student_name.as_str())
            .field(|r: &AttendanceRecord| r.course_code.as_str())
            .field(|r: &AttendanceRecord| r.course_title.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "date" => SortSpec::by_key(|r: &AttendanceRecord| r.date, dir),
            "student" => SortSpec::by_key(|r: &AttendanceRecord| r.student_name.to_lowercase(), dir),
            "course" => SortSpec::by_key(|r: &AttendanceRecord| r.course_code.clone(), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|r: &AttendanceRecord| r.date, SortDir::Desc))
    }

    /// Students and parents see one student; teachers see their courses.
    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Student | Role::Parent => {
                let name = profile.student_name.clone()?;
                Some(Box::new(move |r: &AttendanceRecord| r.student_name == name))
            }
            Role::Teacher => {
                let courses = courses_taught_by(profile.teacher_name.as_deref()?);
                Some(Box::new(move |r: &AttendanceRecord| courses.iter().any(|c| r.course_code == *c)))
            }
            Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("date", "Date"),
            ColumnDef::sortable("student", "Student"),
            ColumnDef::sortable("course", "Course"),
            ColumnDef::plain("instructor", "Instructor"),
            ColumnDef::plain("status", "Status"),
        ]
    }

    fn row(&self, _today: NaiveDate) -> Vec<Cell> {
        vec![
            Cell::text(short_date(self.date)),
            Cell::strong(&self.student_name),
            Cell::text(format!("{} · {}", self.course_code, self.course_title)),
            Cell::muted(&self.instructor),
            Cell::badge(self.status.label(), self.status.tone()),
        ]
    }

    fn summary(_today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("present", |r: &AttendanceRecord| r.status == AttendanceStatus::Present)
            .count_where("late", |r: &AttendanceRecord| r.status == AttendanceStatus::Late)
            .count_where("absent", |r: &AttendanceRecord| r.status == AttendanceStatus::Absent)
            .ratio_of(
                "attendance_rate",
                |r: &AttendanceRecord| r.status == AttendanceStatus::Present,
                |_: &AttendanceRecord| true,
            )
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Sessions", summary.count("total"), "primary"),
            StatCard::count("Present", summary.count("present"), "success"),
            StatCard::count("Late", summary.count("late"), "warning"),
            StatCard::count("Absent", summary.count("absent"), "danger"),
            StatCard::new("Attendance rate", percent(summary.value("attendance_rate")), "info"),
        ]
    }
}
