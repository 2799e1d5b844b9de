// src/models/student/filter.rs

use chrono::NaiveDate;

use crate::models::catalog::PROGRAMS;
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::listing::display::{decimal, percent};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

use super::types::{Student, StudentStatus};

const YEARS: &[&str] = &["1", "2", "3", "4"];

impl Listing for Student {
    const SECTION: Section = Section::Students;
    const SOURCE: &'static str = "students";
    const TITLE: &'static str = "Student Roster";

    fn fixtures(_today: NaiveDate) -> Vec<Self> {
        super::data::dummy()
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::listed("program", "Program", PROGRAMS),
            FilterField::new(
                "year",
                "Year",
                YEARS.iter().map(|y| (y.to_string(), format!("Year {y}"))).collect(),
            ),
            FilterField::new("status", "Status", StudentStatus::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "program" => {
                let program = parse_listed(key, value, PROGRAMS)?;
                Ok(Box::new(move |s: &Student| s.program == program))
            }
            "year" => {
                let year: u8 = parse_listed(key, value, YEARS)?
                    .parse()
                    .map_err(|_| ListError::invalid(format!("bad year {value:?}")))?;
                Ok(Box::new(move |s: &Student| s.year == year))
            }
            "status" => {
                let status: StudentStatus = parse_choice(key, value)?;
                Ok(Box::new(move |s: &Student| s.status == status))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|s: &Student| s.name.as_str())
            .field(|s: &Student| s.id.as_str())
            .field(|s: &Student| s.email.as_str())
            .field(|s: &Student| s.advisor.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "id" => SortSpec::by_key(|s: &Student| s.id.clone(), dir),
            "name" => SortSpec::by_key(|s: &Student| s.name.to_lowercase(), dir),
            "year" => SortSpec::by_key(|s: &Student| s.year, dir),
            "gpa" => SortSpec::by_float(|s: &Student| s.gpa, dir),
            "attendance" => SortSpec::by_float(|s: &Student| s.attendance_rate, dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|s: &Student| s.name.to_lowercase(), SortDir::Asc))
    }

    /// Teachers see their advisees; the registrar sees everyone.
    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Teacher => {
                let advisor = profile.teacher_name.clone()?;
                Some(Box::new(move |s: &Student| s.advisor == advisor))
            }
            Role::Student | Role::Parent => {
                let name = profile.student_name.clone()?;
                Some(Box::new(move |s: &Student| s.name == name))
            }
            Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("id", "ID"),
            ColumnDef::sortable("name", "Name"),
            ColumnDef::plain("program", "Program"),
            ColumnDef::sortable("year", "Year"),
            ColumnDef::sortable("gpa", "GPA"),
            ColumnDef::sortable("attendance", "Attendance"),
            ColumnDef::plain("status", "Status"),
        ]
    }

    fn row(&self, _today: NaiveDate) -> Vec<Cell> {
        vec![
            Cell::muted(&self.id),
            Cell::strong(&self.name),
            Cell::text(&self.program),
            Cell::numeric(self.year.to_string()),
            Cell::numeric(decimal(self.gpa, 2)),
            Cell::numeric(percent(self.attendance_rate)),
            Cell::badge(self.status.label(), self.status.tone()),
        ]
    }

    fn summary(_today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("active", |s: &Student| s.status == StudentStatus::Active)
            .count_where("probation", |s: &Student| s.status == StudentStatus::Probation)
            .average_of("average_gpa", |s: &Student| s.gpa)
            .average_of("average_attendance", |s: &Student| s.attendance_rate)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Students", summary.count("total"), "primary"),
            StatCard::count("Active", summary.count("active"), "success"),
            StatCard::count("On probation", summary.count("probation"), "danger"),
            StatCard::new("Average GPA", decimal(summary.value("average_gpa"), 2), "info"),
            StatCard::new("Average attendance", percent(summary.value("average_attendance")), "info"),
        ]
    }
}
