use chrono::NaiveDate;
use serde::Serialize;

use crate::choice_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCategory {
    Tuition,
    Housing,
    Lab,
    Library,
    Activity,
}

choice_enum!(FeeCategory {
    Tuition => ("tuition", "Tuition"),
    Housing => ("housing", "Housing"),
    Lab => ("lab", "Lab"),
    Library => ("library", "Library"),
    Activity => ("activity", "Activity"),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeStatus {
    Paid,
    Pending,
    Overdue,
}

choice_enum!(FeeStatus {
    Paid => ("paid", "Paid"),
    Pending => ("pending", "Pending"),
    Overdue => ("overdue", "Overdue"),
});

impl FeeStatus {
    /// Unpaid fees turn overdue the day after they fall due.
    pub fn derive(paid: bool, due_date: NaiveDate, today: NaiveDate) -> Self {
        if paid {
            FeeStatus::Paid
        } else if due_date < today {
            FeeStatus::Overdue
        } else {
            FeeStatus::Pending
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "success",
            FeeStatus::Pending => "warning",
            FeeStatus::Overdue => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Fee {
    pub id: String,
    pub student_name: String,
    pub description: String,
    pub category: FeeCategory,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
}

impl Fee {
    pub fn is_paid(&self) -> bool {
        self.status == FeeStatus::Paid
    }

    pub fn outstanding(&self) -> f64 {
        if self.is_paid() { 0.0 } else { self.amount }
    }
}
