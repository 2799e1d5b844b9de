use chrono::{Duration, NaiveDate};

use crate::models::catalog::{STUDENTS, courses_for, spread};

use super::types::{Assignment, SubmissionStatus};

/// (title, due offset from today) handed out in every course.
const TASKS: &[(&str, i64)] = &[
    ("Problem set 1", -6),
    ("Reading response", -2),
    ("Lab report", 0),
    ("Quiz preparation", 1),
    ("Problem set 2", 3),
    ("Project proposal", 6),
    ("Midterm review", 10),
    ("Final project draft", 14),
];

const MAX_SCORE: f64 = 100.0;

pub fn dummy(today: NaiveDate) -> Vec<Assignment> {
    let mut out = Vec::new();
    for (s, student) in STUDENTS.iter().enumerate() {
        for (c, course) in courses_for(s).enumerate() {
            for (t, (title, offset)) in TASKS.iter().enumerate() {
                let roll = spread(s, c, t, 10);
                let status = match *offset {
                    o if o < -3 => {
                        if roll < 8 { SubmissionStatus::Graded } else { SubmissionStatus::Pending }
                    }
                    o if o < 0 => {
                        if roll < 3 {
                            SubmissionStatus::Graded
                        } else if roll < 8 {
                            SubmissionStatus::Submitted
                        } else {
                            SubmissionStatus::Pending
                        }
                    }
                    _ => {
                        if roll < 2 { SubmissionStatus::Submitted } else { SubmissionStatus::Pending }
                    }
                };
                let score = (status == SubmissionStatus::Graded)
                    .then(|| 55.0 + spread(s, t, c, 46) as f64);
                out.push(Assignment {
                    id: format!("A-{}-{}-{}", &student.id[1..], course.code, t + 1),
                    title: title.to_string(),
                    course_code: course.code.to_string(),
                    instructor: course.instructor.to_string(),
                    student_name: student.name.to_string(),
                    due_date: today + Duration::days(*offset),
                    status,
                    score,
                    max_score: MAX_SCORE,
                });
            }
        }
    }
    out
}
