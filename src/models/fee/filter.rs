// src/models/fee/filter.rs

use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::models::list_view::due_date::{days_until, relative_label};
use crate::models::list_view::{
    DueDateClassifier, ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec,
};
use crate::models::listing::display::{money, percent, short_date, urgency_tone};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, unknown_filter,
    unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

use super::types::{Fee, FeeCategory, FeeStatus};

/// Unpaid fees: a day late is overdue, three days out is urgent.
static URGENCY: LazyLock<Result<DueDateClassifier, ListError>> = LazyLock::new(|| {
    DueDateClassifier::new([(-1, "overdue"), (3, "urgent"), (14, "soon")], "normal")
});

pub fn urgency(due_date: NaiveDate, today: NaiveDate) -> &'static str {
    match URGENCY.as_ref() {
        Ok(classifier) => classifier.classify(due_date, today),
        Err(_) => "normal",
    }
}

impl Listing for Fee {
    const SECTION: Section = Section::Fees;
    const SOURCE: &'static str = "fees";
    const TITLE: &'static str = "Fees & Payments";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        super::data::dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::new("status", "Status", FeeStatus::options()),
            FilterField::new("category", "Category", FeeCategory::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "status" => {
                let status: FeeStatus = parse_choice(key, value)?;
                Ok(Box::new(move |f: &Fee| f.status == status))
            }
            "category" => {
                let category: FeeCategory = parse_choice(key, value)?;
                Ok(Box::new(move |f: &Fee| f.category == category))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|f: &Fee| f.id.as_str())
            .field(|f: &Fee| f.student_name.as_str())
            .field(|f: &Fee| f.description.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "due" => SortSpec::by_key(|f: &Fee| f.due_date, dir),
            "amount" => SortSpec::by_float(|f: &Fee| f.amount, dir),
            "student" => SortSpec::by_key(|f: &Fee| f.student_name.to_lowercase(), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|f: &Fee| f.due_date, SortDir::Asc))
    }

    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Student | Role::Parent => {
                let name = profile.student_name.clone()?;
                Some(Box::new(move |f: &Fee| f.student_name == name))
            }
            Role::Teacher | Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::plain("id", "Invoice"),
            ColumnDef::sortable("student", "Student"),
            ColumnDef::plain("description", "Description"),
            ColumnDef::plain("category", "Category"),
            ColumnDef::sortable("amount", "Amount"),
            ColumnDef::sortable("due", "Due"),
            ColumnDef::plain("status", "Status"),
        ]
    }

    fn row(&self, today: NaiveDate) -> Vec<Cell> {
        let due = if self.is_paid() {
            Cell::muted(short_date(self.due_date))
        } else {
            let days = days_until(self.due_date, today);
            Cell::badge(
                format!("{} ({})", short_date(self.due_date), relative_label(days)),
                urgency_tone(urgency(self.due_date, today)),
            )
        };
        vec![
            Cell::muted(&self.id),
            Cell::strong(&self.student_name),
            Cell::text(&self.description),
            Cell::text(self.category.label()),
            Cell::numeric(money(self.amount)),
            due,
            Cell::badge(self.status.label(), self.status.tone()),
        ]
    }

    fn summary(_today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .sum_of("billed", |f: &Fee| f.amount)
            .sum_of("outstanding", |f: &Fee| f.outstanding())
            .count_where("pending", |f: &Fee| f.status == FeeStatus::Pending)
            .count_where("overdue", |f: &Fee| f.status == FeeStatus::Overdue)
            .ratio_of("collected_rate", |f: &Fee| f.is_paid(), |_: &Fee| true)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::new("Total billed", money(summary.value("billed")), "primary"),
            StatCard::new("Outstanding", money(summary.value("outstanding")), "warning"),
            StatCard::count("Pending", summary.count("pending"), "info"),
            StatCard::count("Overdue", summary.count("overdue"), "danger"),
            StatCard::new("Collected", percent(summary.value("collected_rate")), "success"),
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
        ListParams::from_query(&q, &["status", "category"]).unwrap()
    }

    #[test]
    fn thresholds_are_valid() {
        assert!(URGENCY.is_ok());
    }

    #[test]
    fn urgency_buckets() {
        let t = today();
        assert_eq!(urgency(t - Duration::days(1), t), "overdue");
        assert_eq!(urgency(t, t), "urgent");
        assert_eq!(urgency(t + Duration::days(3), t), "urgent");
        assert_eq!(urgency(t + Duration::days(4), t), "soon");
        assert_eq!(urgency(t + Duration::days(15), t), "normal");
    }

    #[test]
    fn overdue_filter_for_student() {
        let fees = Fee::fixtures(today());
        let profile = Profile::demo(Role::Student);
        let p = params(&[("status", "overdue"), ("per_page", "50")]);
        let view = build_query::<Fee>(&p, &profile, 10).unwrap().run(&fees);
        assert!(view.items.iter().all(|f| f.status == FeeStatus::Overdue));
        assert!(view.items.iter().all(|f| Some(&f.student_name) == profile.student_name.as_ref()));
    }

    #[test]
    fn outstanding_excludes_paid() {
        let fees = Fee::fixtures(today());
        let (_, summary) = ListQuery::new(Page::first(10).unwrap()).run_with_summary(&fees, &Fee::summary(today()));
        let unpaid: f64 = fees.iter().filter(|f| !f.is_paid()).map(|f| f.amount).sum();
        assert!((summary.value("outstanding") - unpaid).abs() < 1e-6);
        assert!(summary.value("outstanding") < summary.value("billed"));
    }

    #[test]
    fn paid_rows_have_muted_due_cell() {
        let fees = Fee::fixtures(today());
        let paid = fees.iter().find(|f| f.is_paid()).unwrap();
        assert_eq!(paid.row(today())[5].class, "cell-muted");
        let overdue = fees.iter().find(|f| f.status == FeeStatus::Overdue).unwrap();
        assert_eq!(overdue.row(today())[5].class, "badge badge-danger");
    }

    #[test]
    fn amount_sort_descending() {
        let fees = Fee::fixtures(today());
        let p = params(&[("sort", "amount"), ("dir", "desc")]);
        let view = build_query::<Fee>(&p, &Profile::demo(Role::Admin), 10).unwrap().run(&fees);
        assert_eq!(view.items[0].amount, 4200.0);
    }
}
