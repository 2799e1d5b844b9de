use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::choice_enum;
use crate::models::catalog::{STUDENTS, spread};
use crate::models::list_view::due_date::days_until;
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::listing::display::{percent, short_date};
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, unknown_filter,
    unknown_sort,
};
use crate::models::role::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCategory {
    ItSupport,
    Registration,
    Financial,
    Facilities,
}

choice_enum!(TicketCategory {
    ItSupport => ("it", "IT Support"),
    Registration => ("registration", "Registration"),
    Financial => ("financial", "Financial"),
    Facilities => ("facilities", "Facilities"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

choice_enum!(Priority {
    Low => ("low", "Low"),
    Medium => ("medium", "Medium"),
    High => ("high", "High"),
    Critical => ("critical", "Critical"),
});

impl Priority {
    pub fn tone(&self) -> &'static str {
        match self {
            Priority::Low => "neutral",
            Priority::Medium => "info",
            Priority::High => "warning",
            Priority::Critical => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

choice_enum!(TicketStatus {
    Open => ("open", "Open"),
    InProgress => ("in_progress", "In progress"),
    Resolved => ("resolved", "Resolved"),
    Closed => ("closed", "Closed"),
});

impl TicketStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    pub fn tone(&self) -> &'static str {
        match self {
            TicketStatus::Open => "warning",
            TicketStatus::InProgress => "info",
            TicketStatus::Resolved => "success",
            TicketStatus::Closed => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub requester: String,
    pub category: TicketCategory,
    pub priority: Priority,
    pub status: TicketStatus,
    pub opened_on: NaiveDate,
}

const SUBJECTS: &[(&str, TicketCategory)] = &[
    ("Cannot log in to course portal", TicketCategory::ItSupport),
    ("Course registration hold", TicketCategory::Registration),
    ("Refund for dropped course", TicketCategory::Financial),
    ("Broken heater in dorm room", TicketCategory::Facilities),
    ("Wi-Fi drops in the library", TicketCategory::ItSupport),
    ("Transcript request", TicketCategory::Registration),
    ("Payment plan setup", TicketCategory::Financial),
    ("Projector not working in Hall B", TicketCategory::Facilities),
];

pub fn dummy(today: NaiveDate) -> Vec<SupportTicket> {
    (0..30)
        .map(|i| {
            let (subject, category) = SUBJECTS[i % SUBJECTS.len()];
            let age = spread(i, 2, 3, 21) as i64;
            let status = match spread(i, 1, 0, 8) {
                0 | 1 => TicketStatus::Open,
                2 | 3 => TicketStatus::InProgress,
                4..=6 => TicketStatus::Resolved,
                _ => TicketStatus::Closed,
            };
            SupportTicket {
                id: format!("T-{:04}", 2401 + i),
                subject: subject.to_string(),
                requester: STUDENTS[(i * 5) % STUDENTS.len()].name.to_string(),
                category,
                priority: Priority::ALL[spread(i, 3, 1, Priority::ALL.len())],
                status,
                opened_on: today - Duration::days(age),
            }
        })
        .collect()
}

impl Listing for SupportTicket {
    const SECTION: Section = Section::Tickets;
    const SOURCE: &'static str = "tickets";
    const TITLE: &'static str = "Support Tickets";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::new("status", "Status", TicketStatus::options()),
            FilterField::new("priority", "Priority", Priority::options()),
            FilterField::new("category", "Category", TicketCategory::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "status" => {
                let status: TicketStatus = parse_choice(key, value)?;
                Ok(Box::new(move |t: &SupportTicket| t.status == status))
            }
            "priority" => {
                let priority: Priority = parse_choice(key, value)?;
                Ok(Box::new(move |t: &SupportTicket| t.priority == priority))
            }
            "category" => {
                let category: TicketCategory = parse_choice(key, value)?;
                Ok(Box::new(move |t: &SupportTicket| t.category == category))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|t: &SupportTicket| t.id.as_str())
            .field(|t: &SupportTicket| t.subject.as_str())
            .field(|t: &SupportTicket| t.requester.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "id" => SortSpec::by_key(|t: &SupportTicket| t.id.clone(), dir),
            "priority" => SortSpec::by_key(|t: &SupportTicket| t.priority, dir),
            "opened" => SortSpec::by_key(|t: &SupportTicket| t.opened_on, dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|t: &SupportTicket| t.opened_on, SortDir::Desc))
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("id", "Ticket"),
            ColumnDef::plain("subject", "Subject"),
            ColumnDef::plain("requester", "Requester"),
            ColumnDef::plain("category", "Category"),
            ColumnDef::sortable("priority", "Priority"),
            ColumnDef::plain("status", "Status"),
            ColumnDef::sortable("opened", "Opened"),
        ]
    }

    fn row(&self, today: NaiveDate) -> Vec<Cell> {
        let age = -days_until(self.opened_on, today);
        let opened = match age {
            0 => "today".to_string(),
            1 => "yesterday".to_string(),
            n => format!("{n} days ago"),
        };
        vec![
            Cell::muted(&self.id),
            Cell::strong(&self.subject),
            Cell::text(&self.requester),
            Cell::text(self.category.label()),
            Cell::badge(self.priority.label(), self.priority.tone()),
            Cell::badge(self.status.label(), self.status.tone()),
            Cell::text(format!("{} ({opened})", short_date(self.opened_on))),
        ]
    }

    fn summary(_today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("open", |t: &SupportTicket| !t.status.is_done())
            .count_where("urgent", |t: &SupportTicket| {
                !t.status.is_done() && t.priority >= Priority::High
            })
            .ratio_of("resolution_rate", |t: &SupportTicket| t.status.is_done(), |_: &SupportTicket| true)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Tickets", summary.count("total"), "primary"),
            StatCard::count("Open", summary.count("open"), "warning"),
            StatCard::count("High priority open", summary.count("urgent"), "danger"),
            StatCard::new("Resolution rate", percent(summary.value("resolution_rate")), "success"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::list_view::{ListQuery, Page, SortDir};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn resolution_rate_counts_resolved_and_closed() {
        let all = dummy(today());
        let refs: Vec<&SupportTicket> = all.iter().collect();
        let summary = SupportTicket::summary(today()).evaluate(&refs);
        let done = all.iter().filter(|t| t.status.is_done()).count();
        assert!((summary.value("resolution_rate") - done as f64 / all.len() as f64).abs() < 1e-12);
        assert_eq!(summary.count("open") + done, all.len());
    }

    #[test]
    fn priority_sort_desc_is_stable() {
        let all = dummy(today());
        let view = ListQuery::new(Page::first(100).unwrap())
            .with_sort(SupportTicket::sort("priority", SortDir::Desc).unwrap())
            .run(&all);
        assert!(view.items.windows(2).all(|w| w[0].priority >= w[1].priority));
        // ties keep input (id) order
        for w in view.items.windows(2) {
            if w[0].priority == w[1].priority {
                assert!(w[0].id < w[1].id);
            }
        }
    }

    #[test]
    fn search_by_id() {
        let all = dummy(today());
        let view = ListQuery::new(Page::first(10).unwrap())
            .with_search(SupportTicket::search("t-2405"))
            .run(&all);
        assert_eq!(view.total_matched, 1);
        assert_eq!(view.items[0].id, "T-2405");
    }
}
