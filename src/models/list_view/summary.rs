// src/models/list_view/summary.rs

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Predicate;

/// How a single summary value is computed from the survivor set.
pub enum Aggregation<'a, R> {
    CountWhere(Predicate<'a, R>),
    SumOf(Box<dyn Fn(&R) -> f64 + 'a>),
    /// Records yielding `None` are left out of both the sum and the count.
    AverageOf(Box<dyn Fn(&R) -> Option<f64> + 'a>),
    /// Numerator hits counted among records that satisfy the denominator.
    RatioOf {
        numerator: Predicate<'a, R>,
        denominator: Predicate<'a, R>,
    },
}

impl<R> Aggregation<'_, R> {
    /// Empty inputs yield 0 for every aggregation, never NaN.
    pub fn evaluate(&self, survivors: &[&R]) -> f64 {
        match self {
            Aggregation::CountWhere(pred) => survivors.iter().filter(|r| pred(**r)).count() as f64,
            Aggregation::SumOf(value) => survivors.iter().map(|r| value(*r)).sum(),
            Aggregation::AverageOf(value) => {
                let (sum, n) = survivors
                    .iter()
                    .filter_map(|r| value(*r))
                    .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
                if n == 0 { 0.0 } else { sum / n as f64 }
            }
            Aggregation::RatioOf { numerator, denominator } => {
                let (hits, total) = survivors
                    .iter()
                    .filter(|r| denominator(**r))
                    .fold((0usize, 0usize), |(hits, total), r| {
                        (hits + usize::from(numerator(*r)), total + 1)
                    });
                if total == 0 { 0.0 } else { hits as f64 / total as f64 }
            }
        }
    }
}

/// Named aggregations, evaluated independently of one another.
pub struct SummarySpec<'a, R> {
    entries: Vec<(String, Aggregation<'a, R>)>,
}

impl<R> Default for SummarySpec<'_, R> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<'a, R> SummarySpec<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering an existing name replaces its aggregation in place.
    pub fn insert(&mut self, name: impl Into<String>, aggregation: Aggregation<'a, R>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = aggregation,
            None => self.entries.push((name, aggregation)),
        }
    }

    pub fn count(self, name: impl Into<String>) -> Self {
        self.count_where(name, |_: &R| true)
    }

    pub fn count_where(mut self, name: impl Into<String>, pred: impl Fn(&R) -> bool + 'a) -> Self {
        self.insert(name, Aggregation::CountWhere(Box::new(pred)));
        self
    }

    pub fn sum_of(mut self, name: impl Into<String>, value: impl Fn(&R) -> f64 + 'a) -> Self {
        self.insert(name, Aggregation::SumOf(Box::new(value)));
        self
    }

    pub fn average_of(self, name: impl Into<String>, value: impl Fn(&R) -> f64 + 'a) -> Self {
        self.average_where(name, move |r: &R| Some(value(r)))
    }

    pub fn average_where(
        mut self,
        name: impl Into<String>,
        value: impl Fn(&R) -> Option<f64> + 'a,
    ) -> Self {
        self.insert(name, Aggregation::AverageOf(Box::new(value)));
        self
    }

    pub fn ratio_of(
        mut self,
        name: impl Into<String>,
        numerator: impl Fn(&R) -> bool + 'a,
        denominator: impl Fn(&R) -> bool + 'a,
    ) -> Self {
        self.insert(
            name,
            Aggregation::RatioOf {
                numerator: Box::new(numerator),
                denominator: Box::new(denominator),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evaluate(&self, survivors: &[&R]) -> Summary {
        Summary {
            values: self
                .entries
                .iter()
                .map(|(name, agg)| (name.clone(), agg.evaluate(survivors)))
                .collect(),
        }
    }
}

/// Flat name -> value mapping, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    values: Vec<(String, f64)>,
}

impl Summary {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Missing names read as 0, matching how stats cards treat absent data.
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    pub fn count(&self, name: &str) -> usize {
        self.value(name).round().max(0.0) as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
