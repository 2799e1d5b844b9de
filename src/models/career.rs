//! Job and internship board.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::choice_enum;
use crate::models::list_view::due_date::{days_until, relative_label};
use crate::models::list_view::{
    DueDateClassifier, ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec,
};
use crate::models::listing::display::{percent, short_date, urgency_tone};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::Section;

pub const FIELDS: &[&str] = &["Software", "Data", "Finance", "Education", "Engineering"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Internship,
    FullTime,
    PartTime,
}

choice_enum!(JobKind {
    Internship => ("internship", "Internship"),
    FullTime => ("full_time", "Full-time"),
    PartTime => ("part_time", "Part-time"),
});

#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub kind: JobKind,
    pub field: String,
    pub deadline: NaiveDate,
    pub remote: bool,
}

static DEADLINES: LazyLock<Result<DueDateClassifier, ListError>> =
    LazyLock::new(|| DueDateClassifier::new([(-1, "closed"), (3, "closing")], "open"));

pub fn deadline_state(deadline: NaiveDate, today: NaiveDate) -> &'static str {
    match DEADLINES.as_ref() {
        Ok(classifier) => classifier.classify(deadline, today),
        Err(_) => "open",
    }
}

/// (title, company, location, kind, field, deadline offset, remote)
const POSTINGS: &[(&str, &str, &str, JobKind, &str, i64, bool)] = &[
    ("Backend Engineering Intern", "Northwind Labs", "Seattle, WA", JobKind::Internship, "Software", 2, false),
    ("Data Analyst", "Blue Harbor Bank", "Boston, MA", JobKind::FullTime, "Finance", 20, false),
    ("Teaching Assistant", "City Learning Center", "Remote", JobKind::PartTime, "Education", 9, true),
    ("Machine Learning Intern", "Quanta AI", "Remote", JobKind::Internship, "Data", 0, true),
    ("Junior Web Developer", "Pixel Forge", "Austin, TX", JobKind::FullTime, "Software", 35, false),
    ("Structural Engineering Co-op", "Atlas Build", "Denver, CO", JobKind::Internship, "Engineering", -4, false),
    ("Research Assistant", "Campus Physics Lab", "On campus", JobKind::PartTime, "Engineering", 14, false),
    ("Financial Planning Intern", "Evergreen Capital", "New York, NY", JobKind::Internship, "Finance", 5, false),
    ("Math Tutor", "Bright Minds", "Remote", JobKind::PartTime, "Education", 3, true),
    ("Site Reliability Engineer", "Cloudline", "Remote", JobKind::FullTime, "Software", 28, true),
    ("Data Engineering Intern", "Ledger Metrics", "Chicago, IL", JobKind::Internship, "Data", -1, false),
    ("QA Automation Engineer", "Northwind Labs", "Seattle, WA", JobKind::FullTime, "Software", 12, false),
];

pub fn dummy(today: NaiveDate) -> Vec<JobPosting> {
    POSTINGS
        .iter()
        .enumerate()
        .map(|(i, (title, company, location, kind, field, offset, remote))| JobPosting {
            id: format!("J-{:03}", i + 1),
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            kind: *kind,
            field: field.to_string(),
            deadline: today + Duration::days(*offset),
            remote: *remote,
        })
        .collect()
}

impl Listing for JobPosting {
    const SECTION: Section = Section::Careers;
    const SOURCE: &'static str = "careers";
    const TITLE: &'static str = "Career Opportunities";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::new("kind", "Type", JobKind::options()),
            FilterField::listed("field", "Field", FIELDS),
            FilterField::new(
                "remote",
                "Location",
                vec![("yes".to_string(), "Remote".to_string()), ("no".to_string(), "On site".to_string())],
            ),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "kind" => {
                let kind: JobKind = parse_choice(key, value)?;
                Ok(Box::new(move |j: &JobPosting| j.kind == kind))
            }
            "field" => {
                let field = parse_listed(key, value, FIELDS)?;
                Ok(Box::new(move |j: &JobPosting| j.field == field))
            }
            "remote" => {
                let remote = parse_listed(key, value, &["yes", "no"])? == "yes";
                Ok(Box::new(move |j: &JobPosting| j.remote == remote))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|j: &JobPosting| j.title.as_str())
            .field(|j: &JobPosting| j.company.as_str())
            .field(|j: &JobPosting| j.location.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "deadline" => SortSpec::by_key(|j: &JobPosting| j.deadline, dir),
            "title" => SortSpec::by_key(|j: &JobPosting| j.title.to_lowercase(), dir),
            "company" => SortSpec::by_key(|j: &JobPosting| j.company.to_lowercase(), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|j: &JobPosting| j.deadline, SortDir::Asc))
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("title", "Position"),
            ColumnDef::sortable("company", "Company"),
            ColumnDef::plain("location", "Location"),
            ColumnDef::plain("kind", "Type"),
            ColumnDef::sortable("deadline", "Apply by"),
        ]
    }

    fn row(&self, today: NaiveDate) -> Vec<Cell> {
        let state = deadline_state(self.deadline, today);
        let deadline = if state == "closed" {
            Cell::badge(format!("{} (closed)", short_date(self.deadline)), urgency_tone(state))
        } else {
            Cell::badge(
                format!("{} ({})", short_date(self.deadline), relative_label(days_until(self.deadline, today))),
                urgency_tone(state),
            )
        };
        let location = if self.remote {
            Cell::badge(&self.location, "info")
        } else {
            Cell::text(&self.location)
        };
        vec![
            Cell::strong(&self.title),
            Cell::text(&self.company),
            location,
            Cell::text(self.kind.label()),
            deadline,
        ]
    }

    fn summary(today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("open", move |j: &JobPosting| deadline_state(j.deadline, today) != "closed")
            .count_where("closing", move |j: &JobPosting| deadline_state(j.deadline, today) == "closing")
            .count_where("internships", |j: &JobPosting| j.kind == JobKind::Internship)
            .ratio_of("remote_share", |j: &JobPosting| j.remote, |_: &JobPosting| true)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Open positions", summary.count("open"), "primary"),
            StatCard::count("Closing soon", summary.count("closing"), "warning"),
            StatCard::count("Internships", summary.count("internships"), "info"),
            StatCard::new("Remote", percent(summary.value("remote_share")), "success"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::list_view::{ListQuery, Page};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn deadline_states() {
        let t = today();
        assert!(DEADLINES.is_ok());
        assert_eq!(deadline_state(t - Duration::days(1), t), "closed");
        assert_eq!(deadline_state(t, t), "closing");
        assert_eq!(deadline_state(t + Duration::days(3), t), "closing");
        assert_eq!(deadline_state(t + Duration::days(4), t), "open");
    }

    #[test]
    fn summary_over_postings() {
        let all = dummy(today());
        let refs: Vec<&JobPosting> = all.iter().collect();
        let summary = JobPosting::summary(today()).evaluate(&refs);
        assert_eq!(summary.count("total"), 12);
        assert_eq!(summary.count("open"), 10);
        assert_eq!(summary.count("closing"), 3);
        assert!((summary.value("remote_share") - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn remote_filter() {
        let all = dummy(today());
        let mut query = ListQuery::new(Page::first(50).unwrap());
        query.filter.insert("remote", JobPosting::filter("remote", "yes").unwrap());
        let view = query.run(&all);
        assert_eq!(view.total_matched, 4);
        assert!(JobPosting::filter("remote", "maybe").is_err());
    }
}
