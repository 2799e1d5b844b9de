use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::catalog::{STUDENTS, courses_for, spread};

use super::types::{AttendanceRecord, AttendanceStatus};

/// Sessions recorded per student and course.
const SESSIONS: usize = 6;

/// The last `n` weekdays up to and including `today`, newest first.
pub fn recent_weekdays(today: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(n);
    let mut day = today;
    while days.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day -= Duration::days(1);
    }
    days
}

fn status_for(student: usize, course: usize, session: usize) -> AttendanceStatus {
    match spread(student, course, session, 20) {
        0 => AttendanceStatus::Absent,
        1 => AttendanceStatus::Late,
        2 => AttendanceStatus::Excused,
        _ => AttendanceStatus::Present,
    }
}

pub fn dummy(today: NaiveDate) -> Vec<AttendanceRecord> {
    let days = recent_weekdays(today, SESSIONS);
    let mut records = Vec::new();
    for (s, student) in STUDENTS.iter().enumerate() {
        for (c, course) in courses_for(s).enumerate() {
            for (d, date) in days.iter().enumerate() {
                records.push(AttendanceRecord {
                    id: format!("A-{}-{}-{d}", student.id, course.code),
                    student_name: student.name.to_string(),
                    course_code: course.code.to_string(),
                    course_title: course.title.to_string(),
                    instructor: course.instructor.to_string(),
                    date: *date,
                    status: status_for(s, c, d),
                });
            }
        }
    }
    records
}
