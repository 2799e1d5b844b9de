use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::choice_enum;
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::list_view::due_date::days_until;
use crate::models::listing::display::short_date;
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, unknown_filter,
    unknown_sort,
};
use crate::models::role::{DEMO_TEACHER, Profile, Role, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Everyone,
    Students,
    Parents,
    Staff,
}

choice_enum!(Audience {
    Everyone => ("everyone", "Everyone"),
    Students => ("students", "Students"),
    Parents => ("parents", "Parents"),
    Staff => ("staff", "Staff"),
});

impl Audience {
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Student => Some(Audience::Students),
            Role::Parent => Some(Audience::Parents),
            Role::Teacher => Some(Audience::Staff),
            Role::Admin => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Academic,
    Event,
    Administrative,
    Emergency,
}

choice_enum!(Category {
    Academic => ("academic", "Academic"),
    Event => ("event", "Event"),
    Administrative => ("administrative", "Administrative"),
    Emergency => ("emergency", "Emergency"),
});

impl Category {
    pub fn tone(&self) -> &'static str {
        match self {
            Category::Academic => "primary",
            Category::Event => "info",
            Category::Administrative => "neutral",
            Category::Emergency => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub author: String,
    pub audience: Audience,
    pub category: Category,
    pub posted_on: NaiveDate,
    pub pinned: bool,
}

/// (title, body, author, audience, category, days ago, pinned)
const POSTS: &[(&str, &str, &str, Audience, Category, i64, bool)] = &[
    ("Campus closed for storm", "All classes are cancelled tomorrow. Check email for updates.", "Registrar Office", Audience::Everyone, Category::Emergency, 0, true),
    ("Midterm schedule published", "Midterm exam rooms and times are now on the schedule page.", "Registrar Office", Audience::Students, Category::Academic, 1, true),
    ("Parent-teacher conferences", "Book a 15 minute slot with your child's advisor next week.", "Registrar Office", Audience::Parents, Category::Event, 2, false),
    ("Grade submission deadline", "Final grades for the term are due by Friday at noon.", "Registrar Office", Audience::Staff, Category::Administrative, 3, false),
    ("CS club hackathon", "Teams of up to four. Pizza provided.", DEMO_TEACHER, Audience::Students, Category::Event, 4, false),
    ("Library hours extended", "The main library stays open until midnight during exams.", "Library Services", Audience::Everyone, Category::Academic, 6, false),
    ("Tuition payment reminder", "Spring tuition balances are due at the end of the month.", "Bursar", Audience::Parents, Category::Administrative, 8, false),
    ("Lab safety refresher", "All lab instructors must complete the refresher module.", "Facilities", Audience::Staff, Category::Administrative, 10, false),
    ("Career fair", "Over forty employers on the main quad. Bring your resume.", "Career Center", Audience::Everyone, Category::Event, 12, false),
    ("Scholarship applications open", "Merit scholarships for next year accept applications until April.", "Financial Aid", Audience::Students, Category::Academic, 15, false),
    ("Parking lot resurfacing", "Lot C is closed for two weeks.", "Facilities", Audience::Everyone, Category::Administrative, 18, false),
    ("Spring concert", "The university orchestra performs in the main hall.", "Student Life", Audience::Everyone, Category::Event, 21, false),
    ("Curriculum committee minutes", "Minutes from the last committee meeting are available.", "Registrar Office", Audience::Staff, Category::Academic, 25, false),
    ("Volunteer day", "Parents are welcome to help with the campus cleanup.", "Student Life", Audience::Parents, Category::Event, 30, false),
];

pub fn dummy(today: NaiveDate) -> Vec<Announcement> {
    POSTS
        .iter()
        .enumerate()
        .map(|(i, (title, body, author, audience, category, ago, pinned))| Announcement {
            id: i as u32 + 1,
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            audience: *audience,
            category: *category,
            posted_on: today - Duration::days(*ago),
            pinned: *pinned,
        })
        .collect()
}

impl Listing for Announcement {
    const SECTION: Section = Section::Announcements;
    const SOURCE: &'static str = "announcements";
    const TITLE: &'static str = "Announcements";

    fn fixtures(today: NaiveDate) -> Vec<Self> {
        dummy(today)
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::new("category", "Category", Category::options()),
            FilterField::new("audience", "Audience", Audience::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "category" => {
                let category: Category = parse_choice(key, value)?;
                Ok(Box::new(move |a: &Announcement| a.category == category))
            }
            "audience" => {
                let audience: Audience = parse_choice(key, value)?;
                Ok(Box::new(move |a: &Announcement| a.audience == audience))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|a: &Announcement| a.title.as_str())
            .field(|a: &Announcement| a.body.as_str())
            .field(|a: &Announcement| a.author.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "posted" => SortSpec::by_key(|a: &Announcement| a.posted_on, dir),
            "title" => SortSpec::by_key(|a: &Announcement| a.title.to_lowercase(), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    /// Pinned first, then newest.
    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by(
            |a: &Announcement, b: &Announcement| {
                b.pinned.cmp(&a.pinned).then_with(|| b.posted_on.cmp(&a.posted_on))
            },
            SortDir::Asc,
        ))
    }

    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        let audience = Audience::for_role(profile.role)?;
        Some(Box::new(move |a: &Announcement| {
            a.audience == Audience::Everyone || a.audience == audience
        }))
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("posted", "Posted"),
            ColumnDef::sortable("title", "Title"),
            ColumnDef::plain("category", "Category"),
            ColumnDef::plain("audience", "Audience"),
            ColumnDef::plain("author", "From"),
        ]
    }

    fn row(&self, _today: NaiveDate) -> Vec<Cell> {
        let title = if self.pinned {
            Cell::strong(format!("📌 {}", self.title))
        } else {
            Cell::strong(&self.title)
        };
        vec![
            Cell::muted(short_date(self.posted_on)),
            title,
            Cell::badge(self.category.label(), self.category.tone()),
            Cell::text(self.audience.label()),
            Cell::muted(&self.author),
        ]
    }

    fn summary(today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .count_where("pinned", |a: &Announcement| a.pinned)
            .count_where("this_week", move |a: &Announcement| days_until(a.posted_on, today) > -7)
            .count_where("emergency", |a: &Announcement| a.category == Category::Emergency)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Announcements", summary.count("total"), "primary"),
            StatCard::count("Pinned", summary.count("pinned"), "warning"),
            StatCard::count("This week", summary.count("this_week"), "info"),
            StatCard::count("Emergency", summary.count("emergency"), "danger"),
        ]
    }
}
