//! Weekly productivity reports
//!
//! Two bucketing strategies over closed time-log entries:
//! - **Weekday**: minutes summed per weekday name (Mon..Sun) across every
//!   week ever logged
//! - **Calendar window**: minutes summed per exact date over the last
//!   `window_days` dates ending at an anchor date
//!
//! Each bucket becomes a bar in [0, 100], saturating at
//! [`SATURATION_MINUTES`]. The overall percent is the floored mean of all
//! bars, empty buckets included.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::timelog::{ClosedSpan, TimeLogEntry};

/// Logged minutes at which a bar reaches 100.
pub const SATURATION_MINUTES: i64 = 120;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Minutes logged on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// Bar-chart summary of logged study time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductivityReport {
    /// One label per bar (weekday abbreviations)
    #[serde(rename = "days")]
    pub labels: Vec<String>,
    /// Normalized activity per bucket, 0 to 100
    pub bars: Vec<u8>,
    /// Floored mean of `bars`
    pub percent: u8,
    /// Per-date totals, calendar-window reports only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<DailyMinutes>>,
}

/// `min(100, floor(minutes / 120 * 100))`, with negative totals read as 0.
pub fn bar_for_minutes(minutes: i64) -> u8 {
    let scaled = minutes.max(0).saturating_mul(100) / SATURATION_MINUTES;
    scaled.min(100) as u8
}

/// Aggregator for productivity reports
#[derive(Debug, Clone)]
pub struct ProductivityAggregator {
    /// Number of dates in a calendar-window report
    pub window_days: u32,
}

impl Default for ProductivityAggregator {
    fn default() -> Self {
        Self { window_days: 7 }
    }
}

impl ProductivityAggregator {
    /// Create an aggregator with a 7-day window
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket closed entries by the weekday of `stopped_at`.
    ///
    /// Entries from different weeks that share a weekday land in the same
    /// bucket. Running entries and entries whose `stopped_at` does not
    /// parse are skipped.
    pub fn weekday_report(&self, entries: &[TimeLogEntry]) -> ProductivityReport {
        let mut totals = [0i64; 7];

        for span in closed_spans(entries) {
            let weekday = span.stopped_at.weekday().num_days_from_monday() as usize;
            totals[weekday] += span.minutes;
        }

        let bars: Vec<u8> = totals.iter().map(|t| bar_for_minutes(*t)).collect();

        ProductivityReport {
            labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
            percent: mean_percent(&bars),
            bars,
            raw: None,
        }
    }

    /// Bucket closed entries by exact date over the window ending at `anchor`.
    ///
    /// Dates run oldest first and every date in the window appears in `raw`,
    /// including those with no logged time.
    pub fn calendar_report(&self, entries: &[TimeLogEntry], anchor: NaiveDate) -> ProductivityReport {
        let window: Vec<NaiveDate> = (0..i64::from(self.window_days))
            .rev()
            .map(|back| anchor - Duration::days(back))
            .collect();

        let mut totals: HashMap<NaiveDate, i64> = window.iter().map(|d| (*d, 0)).collect();

        for span in closed_spans(entries) {
            if let Some(total) = totals.get_mut(&span.stopped_at.date()) {
                *total += span.minutes;
            }
        }

        let raw: Vec<DailyMinutes> = window
            .iter()
            .map(|date| DailyMinutes {
                date: *date,
                minutes: totals.get(date).copied().unwrap_or(0),
            })
            .collect();

        let bars: Vec<u8> = raw.iter().map(|d| bar_for_minutes(d.minutes)).collect();

        ProductivityReport {
            labels: window.iter().map(|d| d.format("%a").to_string()).collect(),
            percent: mean_percent(&bars),
            bars,
            raw: Some(raw),
        }
    }
}

fn closed_spans(entries: &[TimeLogEntry]) -> impl Iterator<Item = ClosedSpan> + '_ {
    entries.iter().filter_map(|entry| match entry.closed_span()? {
        Ok(span) => Some(span),
        Err(e) => {
            debug!(entry = entry.id, error = %e, "skipping time log entry");
            None
        }
    })
}

fn mean_percent(bars: &[u8]) -> u8 {
    if bars.is_empty() {
        return 0;
    }
    let sum: u32 = bars.iter().map(|b| u32::from(*b)).sum();
    (sum / bars.len() as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn started() -> NaiveDateTime {
        date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn closed(id: i64, minutes: i64, stopped_at: &str) -> TimeLogEntry {
        TimeLogEntry {
            id,
            task_id: 1,
            start: started(),
            running: false,
            elapsed_minutes: Some(minutes),
            stopped_at: Some(stopped_at.to_string()),
        }
    }

    fn running(id: i64) -> TimeLogEntry {
        TimeLogEntry {
            id,
            task_id: 1,
            start: started(),
            running: true,
            elapsed_minutes: None,
            stopped_at: None,
        }
    }

    #[test]
    fn test_bar_normalization() {
        assert_eq!(bar_for_minutes(0), 0);
        assert_eq!(bar_for_minutes(1), 0);
        assert_eq!(bar_for_minutes(60), 50);
        assert_eq!(bar_for_minutes(119), 99);
        assert_eq!(bar_for_minutes(120), 100);
        assert_eq!(bar_for_minutes(150), 100);
        assert_eq!(bar_for_minutes(-30), 0);
        assert_eq!(bar_for_minutes(i64::MAX), 100);
    }

    #[test]
    fn test_weekday_report_empty() {
        let report = ProductivityAggregator::new().weekday_report(&[]);
        assert_eq!(report.labels, WEEKDAY_LABELS.to_vec());
        assert_eq!(report.bars, vec![0; 7]);
        assert_eq!(report.percent, 0);
        assert!(report.raw.is_none());
    }

    #[test]
    fn test_weekday_report_conflates_weeks() {
        // 2024-01-01 and 2024-01-08 are both Mondays
        let entries = vec![
            closed(1, 60, "2024-01-01T10:00:00"),
            closed(2, 90, "2024-01-08T18:30:00.250000"),
        ];
        let report = ProductivityAggregator::new().weekday_report(&entries);

        assert_eq!(report.bars, vec![100, 0, 0, 0, 0, 0, 0]);
        assert_eq!(report.percent, 14);
    }

    #[test]
    fn test_weekday_report_skips_running_and_malformed() {
        let entries = vec![
            running(1),
            closed(2, 60, "garbage"),
            closed(3, 30, "2024-01-03T09:00:00"), // Wednesday
            TimeLogEntry {
                elapsed_minutes: None,
                ..closed(4, 500, "2024-01-03T09:00:00")
            },
        ];
        let report = ProductivityAggregator::new().weekday_report(&entries);

        assert_eq!(report.bars, vec![0, 0, 25, 0, 0, 0, 0]);
        assert_eq!(report.percent, 3);
    }

    #[test]
    fn test_calendar_report_single_day() {
        let today = date(2024, 3, 10); // Sunday
        let entries = vec![closed(1, 60, "2024-03-10T12:00:00")];

        let report = ProductivityAggregator::new().calendar_report(&entries, today);

        assert_eq!(report.bars, vec![0, 0, 0, 0, 0, 0, 50]);
        assert_eq!(report.percent, 7);
        assert_eq!(report.labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);

        let raw = report.raw.unwrap();
        assert_eq!(raw.len(), 7);
        assert_eq!(raw[0], DailyMinutes { date: date(2024, 3, 4), minutes: 0 });
        assert_eq!(raw[6], DailyMinutes { date: today, minutes: 60 });
    }

    #[test]
    fn test_calendar_report_ignores_out_of_window() {
        let today = date(2024, 3, 10);
        let entries = vec![
            closed(1, 120, "2024-03-03T12:00:00"), // 8 days back
            closed(2, 45, "2024-03-04T08:00:00"),
            closed(3, 45, "2024-03-04T20:00:00"),
            closed(4, 600, "2024-03-11T08:00:00"), // after anchor
            closed(5, 10, "not-a-date"),
        ];

        let report = ProductivityAggregator::new().calendar_report(&entries, today);
        let raw = report.raw.clone().unwrap();

        assert_eq!(raw[0].minutes, 90);
        assert_eq!(raw.iter().map(|d| d.minutes).sum::<i64>(), 90);
        assert_eq!(report.bars[0], 75);
        assert_eq!(report.percent, 10);
    }

    #[test]
    fn test_calendar_report_wire_shape() {
        let report = ProductivityAggregator::new().calendar_report(&[], date(2024, 1, 2));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["days"][6], "Tue");
        assert_eq!(json["raw"][0]["date"], "2023-12-27");
        assert_eq!(json["percent"], 0);

        let weekly = serde_json::to_value(ProductivityAggregator::new().weekday_report(&[])).unwrap();
        assert!(weekly.get("raw").is_none());
    }
}
