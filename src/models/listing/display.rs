// src/models/listing/display.rs

use chrono::NaiveDate;
use serde::Serialize;

/// Ordered column definition passed to templates.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl ColumnDef {
    pub fn plain(key: &'static str, label: &'static str) -> Self {
        ColumnDef { key, label, sortable: false }
    }

    pub fn sortable(key: &'static str, label: &'static str) -> Self {
        ColumnDef { key, label, sortable: true }
    }
}

/// A filter dropdown. `options` are (value, label) pairs.
#[derive(Debug, Clone)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<(String, String)>,
}

impl FilterField {
    pub fn new(key: &'static str, label: &'static str, options: Vec<(String, String)>) -> Self {
        FilterField { key, label, options }
    }

    /// Options where the value doubles as the label.
    pub fn listed(key: &'static str, label: &'static str, values: &[&str]) -> Self {
        let options = values.iter().map(|v| (v.to_string(), v.to_string())).collect();
        FilterField { key, label, options }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub class: String,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: String::new() }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "cell-strong".to_string() }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "cell-muted".to_string() }
    }

    pub fn numeric(text: impl Into<String>) -> Self {
        Cell { text: text.into(), class: "cell-numeric".to_string() }
    }

    /// `tone` picks the badge colour (`success`, `warning`, `danger`, ...).
    pub fn badge(text: impl Into<String>, tone: &str) -> Self {
        Cell { text: text.into(), class: format!("badge badge-{tone}") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub tone: String,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>, tone: &str) -> Self {
        StatCard { label: label.into(), value: value.into(), tone: tone.to_string() }
    }

    pub fn count(label: impl Into<String>, value: usize, tone: &str) -> Self {
        Self::new(label, value.to_string(), tone)
    }
}

/// `$1,234.50`; negative amounts keep a leading minus.
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Ratio in [0, 1] rendered as a percentage with one decimal.
pub fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

pub fn decimal(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Badge tone for a due-date bucket label.
pub fn urgency_tone(bucket: &str) -> &'static str {
    match bucket {
        "overdue" | "closed" => "danger",
        "urgent" | "closing" => "warning",
        "soon" => "info",
        _ => "neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(12.5), "$12.50");
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(1_000_000.0), "$1,000,000.00");
        assert_eq!(money(-45.129), "-$45.13");
    }

    #[test]
    fn percent_and_decimal() {
        assert_eq!(percent(0.875), "87.5%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(decimal(3.14159, 2), "3.14");
    }

    #[test]
    fn dates_render_short() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(short_date(d), "Mar 05, 2026");
    }

    #[test]
    fn urgency_buckets_have_tones() {
        assert_eq!(urgency_tone("overdue"), "danger");
        assert_eq!(urgency_tone("closing"), "warning");
        assert_eq!(urgency_tone("whenever"), "neutral");
    }

    #[test]
    fn badge_class_carries_tone() {
        assert_eq!(Cell::badge("Paid", "success").class, "badge badge-success");
        assert_eq!(Cell::text("x").class, "");
    }
}
