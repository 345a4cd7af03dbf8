//! Signup Aggregation
//!
//! Buckets tenant creation timestamps into a chronologically ordered series
//! for the signup bar chart.
//!
//! ## Pipeline
//!
//! 1. Normalize each `createdAt` through a [`TimestampNormalizer`]
//! 2. Drop records that have no usable timestamp (counted in `skipped`)
//! 3. Map the local calendar date to a bucket (day, or first of month)
//! 4. Count per bucket and emit in date order with display labels

mod timestamp;

pub use timestamp::{offset_from_minutes, TimestampNormalizer, ZoneSuffixNormalizer, IST_OFFSET_MINUTES};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::TenantRecord;

/// Bucketing unit for the signup chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }

    /// Label used by the view-mode selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Granularity::Day => "Date-wise",
            Granularity::Month => "Month-wise",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Granularity::Day => Granularity::Month,
            Granularity::Month => Granularity::Day,
        }
    }

    /// First date of the bucket containing `date`
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => date.with_day(1).unwrap_or(date),
        }
    }

    /// Display label for a bucket, e.g. `22 Jun` or `Jun 2025`
    pub fn label(&self, bucket: NaiveDate, with_year: bool) -> String {
        match (self, with_year) {
            (Granularity::Day, false) => bucket.format("%d %b").to_string(),
            (Granularity::Day, true) => bucket.format("%d %b %Y").to_string(),
            (Granularity::Month, _) => bucket.format("%b %Y").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised granularity name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown granularity: {0} (expected day or month)")]
pub struct ParseGranularityError(pub String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "date" | "d" | "daily" => Ok(Granularity::Day),
            "month" | "m" | "monthly" => Ok(Granularity::Month),
            _ => Err(ParseGranularityError(s.to_string())),
        }
    }
}

/// One bar of the signup chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub signups: u64,
}

/// Aggregated chart series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupSeries {
    pub granularity: Granularity,
    pub points: Vec<ChartPoint>,
    /// Records dropped for a missing or unparseable timestamp
    pub skipped: usize,
}

impl SignupSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn max_signups(&self) -> u64 {
        self.points.iter().map(|p| p.signups).max().unwrap_or(0)
    }

    pub fn total_signups(&self) -> u64 {
        self.points.iter().map(|p| p.signups).sum()
    }
}

/// Count signups per bucket
pub fn aggregate_signups(
    records: &[TenantRecord],
    granularity: Granularity,
    normalizer: &dyn TimestampNormalizer,
) -> SignupSeries {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut skipped = 0;

    for record in records {
        let instant = record
            .created_at
            .as_deref()
            .and_then(|raw| normalizer.normalize(raw));

        match instant {
            Some(dt) => {
                *buckets
                    .entry(granularity.bucket_start(dt.date_naive()))
                    .or_insert(0) += 1;
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, total = records.len(), "Dropped records without a usable createdAt");
    }

    // Day labels are year-less unless that would make two buckets collide
    let spans_years = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => first.year() != last.year(),
        _ => false,
    };

    let points = buckets
        .into_iter()
        .map(|(bucket, signups)| ChartPoint {
            label: granularity.label(bucket, spans_years),
            signups,
        })
        .collect();

    SignupSeries {
        granularity,
        points,
        skipped,
    }
}

/// Integer y-axis ticks from zero up to at least `max`
pub fn axis_ticks(max: u64) -> Vec<u64> {
    if max == 0 {
        return vec![0, 1];
    }

    let step = max.div_ceil(4).max(1);
    let mut ticks = vec![0];
    let mut value = 0;
    while value < max {
        value += step;
        ticks.push(value);
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: &str) -> TenantRecord {
        TenantRecord::new("S").created_at(created_at)
    }

    fn sample() -> Vec<TenantRecord> {
        vec![
            record("2025-06-22T10:00:00 IST"),
            record("2025-06-22T11:00:00 IST"),
            record("2025-07-01T09:00:00 IST"),
        ]
    }

    fn points(series: &SignupSeries) -> Vec<(&str, u64)> {
        series
            .points
            .iter()
            .map(|p| (p.label.as_str(), p.signups))
            .collect()
    }

    #[test]
    fn test_day_buckets() {
        let series = aggregate_signups(&sample(), Granularity::Day, &ZoneSuffixNormalizer::default());
        assert_eq!(points(&series), vec![("22 Jun", 2), ("01 Jul", 1)]);
        assert_eq!(series.skipped, 0);
    }

    #[test]
    fn test_month_buckets() {
        let normalizer = ZoneSuffixNormalizer::default();

        let series = aggregate_signups(&sample(), Granularity::Month, &normalizer);
        assert_eq!(points(&series), vec![("Jun 2025", 2), ("Jul 2025", 1)]);

        let june_only = vec![
            record("2025-06-22T10:00:00 IST"),
            record("2025-06-22T11:00:00 IST"),
            record("2025-06-30T09:00:00 IST"),
        ];
        let series = aggregate_signups(&june_only, Granularity::Month, &normalizer);
        assert_eq!(points(&series), vec![("Jun 2025", 3)]);
    }

    #[test]
    fn test_chronological_not_lexical_order() {
        let records = vec![
            record("2025-01-05T10:00:00 IST"),
            record("2024-12-20T10:00:00 IST"),
            record("2025-04-01T10:00:00 IST"),
            record("2024-08-11T10:00:00 IST"),
        ];

        let series = aggregate_signups(&records, Granularity::Month, &ZoneSuffixNormalizer::default());
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Aug 2024", "Dec 2024", "Jan 2025", "Apr 2025"]);
    }

    #[test]
    fn test_day_labels_gain_year_across_year_boundary() {
        let records = vec![
            record("2025-06-22T10:00:00 IST"),
            record("2024-06-22T10:00:00 IST"),
            record("2024-12-31T10:00:00 IST"),
        ];

        let series = aggregate_signups(&records, Granularity::Day, &ZoneSuffixNormalizer::default());
        assert_eq!(
            points(&series),
            vec![("22 Jun 2024", 1), ("31 Dec 2024", 1), ("22 Jun 2025", 1)]
        );
    }

    #[test]
    fn test_unusable_records_are_skipped() {
        let mut records = sample();
        records.push(TenantRecord::new("no-date"));
        records.push(record("yesterday-ish"));
        records.push(record(""));

        let series = aggregate_signups(&records, Granularity::Day, &ZoneSuffixNormalizer::default());
        assert_eq!(series.total_signups(), 3);
        assert_eq!(series.skipped, 3);
    }

    #[test]
    fn test_granularity_round_trip_is_stable() {
        let normalizer = ZoneSuffixNormalizer::default();
        let records = sample();

        let day = aggregate_signups(&records, Granularity::Day, &normalizer);
        let month = aggregate_signups(&records, Granularity::Day.toggle(), &normalizer);
        let day_again = aggregate_signups(&records, month.granularity.toggle(), &normalizer);

        assert_eq!(month.granularity, Granularity::Month);
        assert_eq!(day, day_again);
    }

    #[test]
    fn test_empty_input() {
        let series = aggregate_signups(&[], Granularity::Month, &ZoneSuffixNormalizer::default());
        assert!(series.is_empty());
        assert_eq!(series.max_signups(), 0);
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("Day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("date".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!(" month ".parse::<Granularity>().unwrap(), Granularity::Month);
        assert!("week".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(axis_ticks(0), vec![0, 1]);
        assert_eq!(axis_ticks(2), vec![0, 1, 2]);
        assert_eq!(axis_ticks(10), vec![0, 3, 6, 9, 12]);
        assert_eq!(*axis_ticks(7).last().unwrap(), 8);
    }
}
