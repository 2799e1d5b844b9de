//! Final course grades per semester.

use chrono::NaiveDate;
use serde::Serialize;

use crate::choice_enum;
use crate::models::catalog::{STUDENTS, course_codes, courses_for, courses_taught_by, spread};
use crate::models::list_view::{ListError, Predicate, SearchSpec, SortDir, SortSpec, Summary, SummarySpec};
use crate::models::listing::display::decimal;
use crate::models::listing::{
    Cell, Choice, ColumnDef, FilterField, Listing, StatCard, parse_choice, parse_listed,
    unknown_filter, unknown_sort,
};
use crate::models::role::{Profile, Role, Section};

pub const SEMESTERS: &[&str] = &["Fall 2025", "Spring 2026"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    A,
    B,
    C,
    D,
    F,
}

choice_enum!(Letter {
    A => ("a", "A"),
    B => ("b", "B"),
    C => ("c", "C"),
    D => ("d", "D"),
    F => ("f", "F"),
});

impl Letter {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Letter::A,
            s if s >= 80.0 => Letter::B,
            s if s >= 70.0 => Letter::C,
            s if s >= 60.0 => Letter::D,
            _ => Letter::F,
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Letter::A => 4.0,
            Letter::B => 3.0,
            Letter::C => 2.0,
            Letter::D => 1.0,
            Letter::F => 0.0,
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            Letter::A | Letter::B => "success",
            Letter::C => "info",
            Letter::D => "warning",
            Letter::F => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeEntry {
    pub student_name: String,
    pub course_code: String,
    pub course_title: String,
    pub credits: u8,
    pub semester: String,
    pub score: f64,
    pub letter: Letter,
}

impl GradeEntry {
    pub fn quality_points(&self) -> f64 {
        self.letter.points() * f64::from(self.credits)
    }
}

pub fn dummy() -> Vec<GradeEntry> {
    let mut out = Vec::new();
    for (s, student) in STUDENTS.iter().enumerate() {
        for (c, course) in courses_for(s).enumerate() {
            for (m, semester) in SEMESTERS.iter().enumerate() {
                let score = 52.0 + spread(s, c + 2, m + 1, 48) as f64;
                out.push(GradeEntry {
                    student_name: student.name.to_string(),
                    course_code: course.code.to_string(),
                    course_title: course.title.to_string(),
                    credits: course.credits,
                    semester: semester.to_string(),
                    score,
                    letter: Letter::from_score(score),
                });
            }
        }
    }
    out
}

impl Listing for GradeEntry {
    const SECTION: Section = Section::Grades;
    const SOURCE: &'static str = "grades";
    const TITLE: &'static str = "Grades";

    fn fixtures(_today: NaiveDate) -> Vec<Self> {
        dummy()
    }

    fn filter_fields() -> Vec<FilterField> {
        vec![
            FilterField::listed("semester", "Semester", SEMESTERS),
            FilterField::listed("course", "Course", &course_codes()),
            FilterField::new("letter", "Grade", Letter::options()),
        ]
    }

    fn filter(key: &str, value: &str) -> Result<Predicate<'static, Self>, ListError> {
        match key {
            "semester" => {
                let semester = parse_listed(key, value, SEMESTERS)?;
                Ok(Box::new(move |g: &GradeEntry| g.semester == semester))
            }
            "course" => {
                let code = parse_listed(key, value, &course_codes())?;
                Ok(Box::new(move |g: &GradeEntry| g.course_code == code))
            }
            "letter" => {
                let letter: Letter = parse_choice(key, value)?;
                Ok(Box::new(move |g: &GradeEntry| g.letter == letter))
            }
            _ => Err(unknown_filter(key)),
        }
    }

    fn search(term: &str) -> SearchSpec<'static, Self> {
        SearchSpec::new(term)
            .field(|g: &GradeEntry| g.course_code.as_str())
            .field(|g: &GradeEntry| g.course_title.as_str())
            .field(|g: &GradeEntry| g.student_name.as_str())
    }

    fn sort(column: &str, dir: SortDir) -> Result<SortSpec<'static, Self>, ListError> {
        Ok(match column {
            "course" => SortSpec::by_key(|g: &GradeEntry| g.course_code.clone(), dir),
            "student" => SortSpec::by_key(|g: &GradeEntry| g.student_name.to_lowercase(), dir),
            "score" => SortSpec::by_float(|g: &GradeEntry| g.score, dir),
            "credits" => SortSpec::by_key(|g: &GradeEntry| g.credits, dir),
            _ => return Err(unknown_sort(column)),
        })
    }

    /// Latest semester first, then by course.
    fn default_sort() -> Option<SortSpec<'static, Self>> {
        Some(SortSpec::by(
            |a: &GradeEntry, b: &GradeEntry| {
                let semester = |g: &GradeEntry| SEMESTERS.iter().position(|s| *s == g.semester);
                semester(b).cmp(&semester(a)).then_with(|| a.course_code.cmp(&b.course_code))
            },
            SortDir::Asc,
        ))
    }

    fn scope(profile: &Profile) -> Option<Predicate<'static, Self>> {
        match profile.role {
            Role::Student | Role::Parent => {
                let name = profile.student_name.clone()?;
                Some(Box::new(move |g: &GradeEntry| g.student_name == name))
            }
            Role::Teacher => {
                let courses = courses_taught_by(profile.teacher_name.as_deref()?);
                Some(Box::new(move |g: &GradeEntry| courses.iter().any(|c| g.course_code == *c)))
            }
            Role::Admin => None,
        }
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::plain("semester", "Semester"),
            ColumnDef::sortable("course", "Course"),
            ColumnDef::sortable("student", "Student"),
            ColumnDef::sortable("credits", "Credits"),
            ColumnDef::sortable("score", "Score"),
            ColumnDef::plain("letter", "Grade"),
        ]
    }

    fn row(&self, _today: NaiveDate) -> Vec<Cell> {
        vec![
            Cell::muted(&self.semester),
            Cell::strong(format!("{} · {}", self.course_code, self.course_title)),
            Cell::text(&self.student_name),
            Cell::numeric(self.credits.to_string()),
            Cell::numeric(decimal(self.score, 1)),
            Cell::badge(self.letter.label(), self.letter.tone()),
        ]
    }

    fn summary(_today: NaiveDate) -> SummarySpec<'static, Self> {
        SummarySpec::new()
            .count("total")
            .average_of("average_score", |g: &GradeEntry| g.score)
            .sum_of("credits", |g: &GradeEntry| f64::from(g.credits))
            .sum_of("quality_points", |g: &GradeEntry| g.quality_points())
            .count_where("a_grades", |g: &GradeEntry| g.letter == Letter::A)
            .count_where("failing", |g: &GradeEntry| g.letter == Letter::F)
    }

    fn stat_cards(summary: &Summary) -> Vec<StatCard> {
        vec![
            StatCard::count("Courses graded", summary.count("total"), "primary"),
            StatCard::new("Average score", decimal(summary.value("average_score"), 1), "info"),
            StatCard::new("GPA", decimal(gpa(summary), 2), "success"),
            StatCard::count("A grades", summary.count("a_grades"), "success"),
            StatCard::count("Failing", summary.count("failing"), "danger"),
        ]
    }
}

/// Credit-weighted grade point average; 0 when nothing is graded.
pub fn gpa(summary: &Summary) -> f64 {
    let credits = summary.value("credits");
    if credits == 0.0 { 0.0 } else { summary.value("quality_points") / credits }
}
