use crate::models::catalog::{STUDENTS, spread};

use super::types::{Student, StudentStatus};

pub fn email_for(name: &str) -> String {
    let local: String = name
        .split_whitespace()
        .map(|part| part.chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>())
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase();
    format!("{local}@campus.edu")
}

pub fn dummy() -> Vec<Student> {
    STUDENTS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let gpa = 2.0 + spread(i, 1, 2, 21) as f64 / 10.0;
            let attendance_rate = 0.70 + spread(i, 3, 1, 30) as f64 / 100.0;
            let status = if gpa < 2.4 {
                StudentStatus::Probation
            } else if spread(i, 0, 4, 9) == 0 {
                StudentStatus::OnLeave
            } else {
                StudentStatus::Active
            };
            Student {
                id: s.id.to_string(),
                name: s.name.to_string(),
                email: email_for(s.name),
                program: s.program.to_string(),
                year: s.year,
                advisor: s.advisor.to_string(),
                status,
                gpa,
                attendance_rate,
            }
        })
        .collect()
}
