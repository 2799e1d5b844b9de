use serde::Serialize;

use crate::choice_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentStatus {
    Active,
    Probation,
    OnLeave,
}

choice_enum!(StudentStatus {
    Active => ("active", "Active"),
    Probation => ("probation", "Probation"),
    OnLeave => ("on_leave", "On leave"),
});

impl StudentStatus {
    pub fn tone(&self) -> &'static str {
        match self {
            StudentStatus::Active => "success",
            StudentStatus::Probation => "danger",
            StudentStatus::OnLeave => "neutral",
        }
    }
}

/// Roster entry as shown to advisors and the registrar.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub program: String,
    pub year: u8,
    pub advisor: String,
    pub status: StudentStatus,
    pub gpa: f64,
    /// Share of sessions attended, 0..=1.
    pub attendance_rate: f64,
}
