use chrono::NaiveDate;
use serde::Serialize;

use crate::choice_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Submitted,
    Graded,
}

choice_enum!(SubmissionStatus {
    Pending => ("pending", "Pending"),
    Submitted => ("submitted", "Submitted"),
    Graded => ("graded", "Graded"),
});

impl SubmissionStatus {
    pub fn tone(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "warning",
            SubmissionStatus::Submitted => "info",
            SubmissionStatus::Graded => "success",
        }
    }
}

/// One student's copy of a course assignment.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub course_code: String,
    pub instructor: String,
    pub student_name: String,
    pub due_date: NaiveDate,
    pub status: SubmissionStatus,
    pub score: Option<f64>,
    pub max_score: f64,
}

impl Assignment {
    pub fn is_open(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    /// Score as a share of `max_score`, once graded.
    pub fn ratio(&self) -> Option<f64> {
        self.score.map(|s| s / self.max_score)
    }
}
