// src/models/list_view/due_date.rs
//
// Calendar-day policy: days are counted between calendar dates. Instants are
// first truncated to their UTC date, so two timestamps on the same UTC day are
// always 0 days apart regardless of time of day or local timezone.

use chrono::{DateTime, NaiveDate, Utc};

use super::ListError;

/// Whole calendar days from `today` to `target`; negative once past due.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

pub fn days_until_instant(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    days_until(target.date_naive(), now.date_naive())
}

/// Maps a due date onto urgency buckets such as overdue/urgent/soon.
#[derive(Debug, Clone, PartialEq)]
pub struct DueDateClassifier {
    thresholds: Vec<(i64, String)>,
    fallback: String,
}

impl DueDateClassifier {
    /// `thresholds` are `(days_inclusive, label)` pairs in ascending order of
    /// days. Out-of-order thresholds would make later buckets unreachable, so
    /// they are rejected.
    pub fn new<L: Into<String>>(
        thresholds: impl IntoIterator<Item = (i64, L)>,
        fallback: impl Into<String>,
    ) -> Result<Self, ListError> {
        let thresholds: Vec<(i64, String)> = thresholds
            .into_iter()
            .map(|(days, label)| (days, label.into()))
            .collect();
        if let Some(pair) = thresholds.windows(2).find(|w| w[1].0 < w[0].0) {
            return Err(ListError::invalid(format!(
                "due-date thresholds must ascend: {} ({}) follows {} ({})",
                pair[1].0, pair[1].1, pair[0].0, pair[0].1
            )));
        }
        Ok(Self { thresholds, fallback: fallback.into() })
    }

    pub fn classify_days(&self, days_until: i64) -> &str {
        self.thresholds
            .iter()
            .find(|(limit, _)| days_until <= *limit)
            .map(|(_, label)| label.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn classify(&self, target: NaiveDate, today: NaiveDate) -> &str {
        self.classify_days(days_until(target, today))
    }

    pub fn classify_instant(&self, target: DateTime<Utc>, now: DateTime<Utc>) -> &str {
        self.classify_days(days_until_instant(target, now))
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Human label for a day offset, as shown next to due dates.
pub fn relative_label(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("in {d} days"),
    }
}
