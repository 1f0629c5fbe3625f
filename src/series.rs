//! Day-bucketed stargazer counts.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::StarEvent;

/// Format of the calendar-day keys.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Star counts per UTC calendar day. Iteration is in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    days: BTreeMap<NaiveDate, u64>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, day: NaiveDate) -> Option<u64> {
        self.days.get(&day).copied()
    }

    /// Count for a `YYYY-MM-DD` key.
    pub fn get_key(&self, key: &str) -> Option<u64> {
        NaiveDate::parse_from_str(key, DAY_FORMAT)
            .ok()
            .and_then(|day| self.get(day))
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.days.values().sum()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, u64)> + '_ {
        self.days.iter().map(|(day, count)| (*day, *count))
    }

    /// `(YYYY-MM-DD, count)` pairs in ascending date order.
    pub fn keyed(&self) -> impl DoubleEndedIterator<Item = (String, u64)> + '_ {
        self.iter().map(|(day, count)| (format_day(day), count))
    }

    /// Entries whose day is strictly after the UTC date of `threshold`.
    pub fn window_after(&self, threshold: DateTime<Utc>) -> DailySeries {
        let cutoff = threshold.date_naive();
        DailySeries {
            days: self
                .days
                .iter()
                .filter(|(day, _)| **day > cutoff)
                .map(|(day, count)| (*day, *count))
                .collect(),
        }
    }
}

impl FromIterator<(NaiveDate, u64)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u64)>>(iter: I) -> Self {
        let mut series = DailySeries::new();
        for (day, count) in iter {
            *series.days.entry(day).or_insert(0) += count;
        }
        series
    }
}

/// Group events by the UTC date they occurred on.
pub fn bucket_by_day(events: &[StarEvent]) -> DailySeries {
    events
        .iter()
        .map(|event| (event.occurred_at.date_naive(), 1))
        .collect()
}

/// Free-function form of [`DailySeries::window_after`].
pub fn window_after(series: &DailySeries, threshold: DateTime<Utc>) -> DailySeries {
    series.window_after(threshold)
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}
