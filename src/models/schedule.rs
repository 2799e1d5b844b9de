//! Weekly class timetable.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use crate::choice_enum;
use crate::models::catalog::{COURSES, STUDENTS, course_codes, courses_for};
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::listing::display::decimal;
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

choice_enum!(Day {
    Mon => ("mon", "Monday"),
    Tue => ("tue", "Tuesday"),
    Wed => ("wed", "Wednesday"),
    Thu => ("thu", "Thursday"),
    Fri => ("fri", "Friday"),
});

impl Day {
    pub fn of(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Day::Mon),
            Weekday::Tue => Some(Day::Tue),
            Weekday::Wed => Some(Day::Wed),
            Weekday::Thu => Some(Day::Thu),
            Weekday::Fri => Some(Day::Fri),
            Weekday::Sat | Weekday::Sun => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Lecture,
    Lab,
    Tutorial,
}

choice_enum!(SessionKind {
    Lecture => ("lecture", "Lecture"),
    Lab => ("lab", "Lab"),
    Tutorial => ("tutorial", "Tutorial"),
});

impl SessionKind {
    pub fn tone(&self) -> &'static str {
        match self {
            SessionKind::Lecture => "primary",
            SessionKind::Lab => "info",
            SessionKind::Tutorial => "neutral",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSession {
    pub course_code: String,
    pub course_title: String,
    pub instructor: String,
    pub day: Day,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub room: String,
    pub kind: SessionKind,
}

impl ClassSession {
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_minutes() as f64 / 60.0
    }
}

/// Per course: (day, start hour, minutes, kind) slots. Index matches `COURSES`.
const SLOTS: &[&[(Day, u32, i64, SessionKind)]] = &[
    &[(Day::Mon, 9, 90, SessionKind::Lecture), (Day::Wed, 9, 90, SessionKind::Lecture), (Day::Thu, 14, 120, SessionKind::Lab)],
    &[(Day::Tue, 11, 90, SessionKind::Lecture), (Day::Thu, 11, 90, SessionKind::Lecture), (Day::Fri, 10, 60, SessionKind::Tutorial)],
    &[(Day::Mon, 13, 60, SessionKind::Lecture), (Day::Wed, 13, 60, SessionKind::Lecture), (Day::Fri, 13, 60, SessionKind::Tutorial)],
    &[(Day::Tue, 15, 90, SessionKind::Lecture), (Day::Thu, 9, 60, SessionKind::Tutorial)],
    &[(Day::Mon, 11, 60, SessionKind::Lecture), (Day::Wed, 15, 60, SessionKind::Lecture), (Day::Fri, 14, 120, SessionKind::Lab)],
];

pub fn dummy() -> Vec<ClassSession> {
    let mut out = Vec::new();
    for (i, course) in COURSES.iter().enumerate() {
        for (day, hour, minutes, kind) in SLOTS.get(i).copied().unwrap_or_default() {
            let Some(start) = NaiveTime::from_hms_opt(*hour, 0, 0) else { continue };
            let room = match kind {
                SessionKind::Lab => format!("Lab {}", 101 + i),
                _ => format!("Hall {}", (b'A' + i as u8) as char),
            };
            out.push(ClassSession {
                course_code: course.code.to_string(),
                course_title: course.title.to_string(),
                instructor: course.instructor.to_string(),
                day: *day,
                start,
                end: start + chrono::Duration::minutes(*minutes),
                room,
                kind: *kind,
            });
        }
    }
    out
}

impl Listing for ClassSession {
    const SECTION: Section = Section::Schedule;
    const SOURCE: &'static str = "schedule";
    const TITLE: &'static str = "Class Schedule";

    fn fixtures(_today: NaiveDate) -> Vec<Self> {
        dummy()
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::new("day", "Day", Day::options()),
            FilterField::new("kind", "Type", SessionKind::options()),
            FilterField::listed("course", "Course", &course_codes()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "day" => {
                let day: Day = parse_choice(key, value)?;
                Ok(Box::new(move |s: &ClassSession| s.day == day))
            }
            "kind" => {
                let kind: SessionKind = parse_choice(key, value)?;
                Ok(Box::new(move |s: &ClassSession| s.kind == kind))
            }
            "course" => {
                let code = parse_listed(key, value, &course_codes())?;
                Ok(Box::new(move |s: &ClassSession| s.course_code == code))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|s: &ClassSession| s.course_code.as_str())
            .field(|s: &ClassSession| s.course_title.as_str())
            .field(|s: &ClassSession| s.instructor.as_str())
            .field(|s: &ClassSession| s.room.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "day" => SortSpec::by_key(|s: &ClassSession| (s.day, s.start), dir),
            "course" => SortSpec::by_key(|s: &ClassSession| s.course_code.clone(), dir),
            "room" => SortSpec::by_key(|s: &ClassSession| s.room.clone(), dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by_key(|s: &ClassSession| (s.day, s.start), SortDir::Asc))
    }

    /// Students see their enrolled courses; teachers their own sessions.
    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Student | Role::Parent => {
                let name = profile.student_name.as_deref()?;
                let index = STUDENTS.iter().position(|s| s.name == name)?;
                let codes: Vec<&'static str> = courses_for(index).map(|c| c.code).collect();
                Some(Box::new(move |s: &ClassSession| codes.iter().any(|c| s.course_code == *c)))
            }
            Role::Teacher => {
                let name = profile.teacher_name.clone()?;
                Some(Box::new(move |s: &ClassSession| s.instructor == name))
            }
            Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::sortable("day", "Day"),
            ColumnDef::plain("time", "Time"),
            ColumnDef::sortable("course", "Course"),
            ColumnDef::plain("kind", "Type"),
            ColumnDef::plain("instructor", "Instructor"),
            ColumnDef::sortable("room", "Room"),
        ]
    }

    fn row(&self, today: NaiveDate) -> Vec<Cell> {
        let day = if Day::of(today.weekday()) == Some(self.day) {
            Cell::badge(format!("{} (today)", self.day.label()), "primary")
        } else {
            Cell::text(self.day.label())
        };
        vec![
            day,
            Cell::muted(format!("{}–{}", self.start.format("%H:%M"), self.end.format("%H:%M"))),
            Cell::strong(format!("{} · {}", self.course_code, self.course_title)),
            Cell::badge(self.kind.label(), self.kind.tone()),
            Cell::text(&self.instructor),
            Cell::text(&self.room),
        ]
    }

    fn summary(today: NaiveDate) -> SummarySpec<'static, Self> {
        let today = Day::of(today.weekday());
        SummarySpec::new()
            .count("total")
            .sum_of("weekly_hours", |s: &ClassSession| s.hours())
            .count_where("labs", |s: &ClassSession| s.kind == SessionKind::Lab)
            .count_where("today", move |s: &ClassSession| Some(s.day) == today)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Sessions / week", summary.count("total"), "primary"),
            StatCard::new("Contact hours", decimal(summary.value("weekly_hours"), 1), "info"),
            StatCard::count("Labs", summary.count("labs"), "neutral"),
            StatCard::count("Today", summary.count("today"), "success"),
        ]
    }
}
