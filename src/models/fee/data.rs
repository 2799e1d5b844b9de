use chrono::{Duration, NaiveDate};

use crate::models::catalog::{STUDENTS, spread};

use super::types::{Fee, FeeCategory, FeeStatus};

/// (category, description, amount, due offset in days from today)
const SCHEDULE: &[(FeeCategory, &str, f64, i64)] = &[
    (FeeCategory::Tuition, "Spring semester tuition", 4200.0, -20),
    (FeeCategory::Library, "Overdue book fine", 25.0, -3),
    (FeeCategory::Lab, "Lab materials", 180.0, 2),
    (FeeCategory::Activity, "Student activity fee", 95.0, 12),
    (FeeCategory::Housing, "Residence hall deposit", 650.0, 30),
];

fn is_paid(student: usize, fee: usize, offset: i64) -> bool {
    let roll = spread(student, fee, 1, 4);
    if offset < 0 { roll != 0 } else { roll < 2 }
}

pub fn dummy(today: NaiveDate) -> Vec<Fee> {
    let mut fees = Vec::new();
    for (s, student) in STUDENTS.iter().enumerate() {
        for (f, (category, description, amount, offset)) in SCHEDULE.iter().enumerate() {
            let due_date = today + Duration::days(*offset);
            let paid = is_paid(s, f, *offset);
            fees.push(Fee {
                id: format!("F-{}-{:02}", &student.id[1..], f + 1),
                student_name: student.name.to_string(),
                description: description.to_string(),
                category: *category,
                amount: *amount,
                due_date,
                status: FeeStatus::derive(paid, due_date, today),
            });
        }
    }
    fees
}
