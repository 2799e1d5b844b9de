use chrono::NaiveDate;
use serde::Serialize;

use crate::choice_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Excused,
}

choice_enum!(AttendanceStatus {
    Present => ("present", "Present"),
    Late => ("late", "Late"),
    Absent => ("absent", "Absent"),
    Excused => ("excused", "Excused"),
});

impl AttendanceStatus {
    pub fn tone(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "success",
            AttendanceStatus::Late => "warning",
            AttendanceStatus::Absent => "danger",
            AttendanceStatus::Excused => "neutral",
        }
    }
}

/// One student's mark for one class session.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_name: String,
    pub course_code: String,
    pub course_title: String,
    pub instructor: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
