// src/models/assignment/filter.rs

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::models::catalog::{course_codes, courses_taught_by};
use crate::models::list_view::due_date::{days_until, relative_label};
use crate::models::list_view::{
    DueDateClassifier, ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec,
};
use crate::models::listing::display::{decimal, short_date, urgency_tone};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

use super::types::{Assignment, SubmissionStatus};

static URGENCY: LazyLock<Result<DueDateClassifier, ListError>> = LazyLock::new(|| {
    DueDateClassifier::new([(-1, "overdue"), (2, "urgent"), (7, "soon")], "normal")
});

pub fn urgency(due_date: NaiveDate, today: NaiveDate) -> &'static str {
    match URGENCY.as_ref() {
        Ok(classifier) => classifier.classify(due_date, today),
        Err(_) => "normal",
    }
}

impl Listing for Assignment {
    const SECTION: Section = Section::Assignments;
    const SOURCE: &'static str = "assignments";
    const TITLE: &'static str = "Assignments";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        super::data::dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::listed("course", "Course", &course_codes()),
            FilterField::new("status", "Status", SubmissionStatus::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "course" => {
                let code = parse_listed(key, value, &course_codes())?;
                Ok(Box::new(move |a: &Assignment| a.course_code == code))
            }
            "status" => {
                let status: SubmissionStatus = parse_choice(key, value)?;
                Ok(Box::new(move |a: &Assignment| a.status == status))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|a: &Assignment| a.title.as_str())
            .field(|a: &Assignment| a.course_code.as_str())
            .field(|a: &Assignment| a.student_name.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "due" => SortSpec::by_key(|a: &Assignment| a.due_date, dir),
            "title" => SortSpec::by_key(|a: &Assignment| a.title.to_lowercase(), dir),
            "course" => SortSpec::by_key(|a: &Assignment| a.course_code.clone(), dir),
            "student" => SortSpec::by_key(|a: &Assignment| a.student_name.to_lowercase(), dir),
            // Ungraded work sorts below any score.
            "score" => SortSpec::by_float(|a: &Assignment| a.score.unwrap_or(-1.0), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|a: &Assignment| a.due_date, SortDir::Asc))
    }

    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Student | Role::Parent => {
                let name = profile.student_name.clone()?;
                Some(Box::new(move |a: &Assignment| a.student_name == name))
            }
            Role::Teacher => {
                let courses = courses_taught_by(profile.teacher_name.as_deref()?);
                Some(Box::new(move |a: &Assignment| courses.iter().any(|c| a.course_code == *c)))
            }
            Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("title", "Assignment"),
            ColumnDef::sortable("course", "Course"),
            ColumnDef::sortable("student", "Student"),
            ColumnDef::sortable("due", "Due"),
            ColumnDef::plain("status", "Status"),
            ColumnDef::sortable("score", "Score"),
        ]
    }

    fn row(&self, today: NaiveDate) -> Vec<Cell> {
        let due = if self.is_open() {
            let days = days_until(self.due_date, today);
            Cell::badge(
                format!("{} ({})", short_date(self.due_date), relative_label(days)),
                urgency_tone(urgency(self.due_date, today)),
            )
        } else {
            Cell::muted(short_date(self.due_date))
        };
        let score = match self.score {
            Some(score) => Cell::numeric(format!("{} / {}", decimal(score, 0), decimal(self.max_score, 0))),
            None => Cell::muted("-"),
        };
        vec![
            Cell::strong(&self.title),
            Cell::text(&self.course_code),
            Cell::text(&self.student_name),
            due,
            Cell::badge(self.status.label(), self.status.tone()),
            score,
        ]
    }

    fn summary(today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("pending", |a: &Assignment| a.is_open())
            .count_where("overdue", move |a: &Assignment| {
                a.is_open() && urgency(a.due_date, today) == "overdue"
            })
            .count_where("due_this_week", move |a: &Assignment| {
                a.is_open() && (0..=7).contains(&days_until(a.due_date, today))
            })
            .count_where("submitted", |a: &Assignment| a.status == SubmissionStatus::Submitted)
            .count_where("graded", |a: &Assignment| a.status == SubmissionStatus::Graded)
            .average_where("average_score", |a: &Assignment| a.score)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        let average = if summary.count("graded") == 0 {
            "-".to_string()
        } else {
            decimal(summary.value("average_score"), 1)
        };
        vec![
            StatCard::count("Assignments", summary.count("total"), "primary"),
            StatCard::count("Pending", summary.count("pending"), "warning"),
            StatCard::count("Overdue", summary.count("overdue"), "danger"),
            StatCard::count("Due this week", summary.count("due_this_week"), "info"),
            StatCard::new("Average score", average, "success"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::list_view::{ListParams, ListQuery, Page};
    use crate::models::listing::build_query;
    use chrono::Duration;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        let q: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ListParams::from_query(&q, &["course", "status"]).unwrap()
    }

    #[test]
    fn buckets_follow_days() {
        let t = today();
        assert!(URGENCY.is_ok());
        assert_eq!(urgency(t - Duration::days(2), t), "overdue");
        assert_eq!(urgency(t, t), "urgent");
        assert_eq!(urgency(t + Duration::days(2), t), "urgent");
        assert_eq!(urgency(t + Duration::days(6), t), "soon");
        assert_eq!(urgency(t + Duration::days(14), t), "normal");
    }

    #[test]
    fn average_skips_ungraded() {
        let all = Assignment::fixtures(today());
        let query = ListQuery::new(Page::first(10).unwrap());
        let (_, summary) = query.run_with_summary(&all, &Assignment::summary(today()));
        let scores: Vec<f64> = all.iter().filter_map(|a| a.score).collect();
        let expected = scores.iter().sum::<f64>() / scores.len() as f64;
        assert!((summary.value("average_score") - expected).abs() < 1e-9);
    }

    #[test]
    fn overdue_count_only_open_past_due() {
        let all = Assignment::fixtures(today());
        let refs: Vec<&Assignment> = all.iter().collect();
        let summary = Assignment::summary(today()).evaluate(&refs);
        let expected = all.iter().filter(|a| a.is_open() && a.due_date < today()).count();
        assert_eq!(summary.count("overdue"), expected);
    }

    #[test]
    fn teacher_filters_by_own_course() {
        let all = Assignment::fixtures(today());
        let p = params(&[("course", "CS220"), ("status", "pending"), ("per_page", "200")]);
        let view = build_query::<Assignment>(&p, &Profile::demo(Role::Teacher), 10).unwrap().run(&all);
        assert!(view.total_matched > 0);
        assert!(view.items.iter().all(|a| a.course_code == "CS220" && a.is_open()));

        let p = params(&[("course", "ENG105")]);
        let view = build_query::<Assignment>(&p, &Profile::demo(Role::Teacher), 10).unwrap().run(&all);
        assert_eq!(view.total_matched, 0);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn empty_survivors_give_zero_average() {
        let all = Assignment::fixtures(today());
        let query = ListQuery::new(Page::first(10).unwrap()).with_search(Assignment::search("no such title"));
        let (view, summary) = query.run_with_summary(&all, &Assignment::summary(today()));
        assert!(view.items.is_empty());
        assert_eq!(summary.value("average_score"), 0.0);
        assert_eq!(Assignment::stat_cards(&summary)[4].value, "-");
    }
}
