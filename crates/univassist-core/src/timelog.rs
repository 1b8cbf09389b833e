//! Start/stop study timers.
//!
//! An entry is created running and closed exactly once. Closing stamps
//! `elapsed_minutes` and `stopped_at`; closed entries are never touched
//! again. Several timers may run for the same task at once, and stopping
//! closes the most recently started one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TimestampError;
use crate::storage::{next_id, Record};
use crate::timestamp;

/// Payload returned when a stop finds nothing to close.
pub const NO_RUNNING_TIMER: &str = "No running timer found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLogEntry {
    pub id: i64,
    pub task_id: i64,
    #[serde(with = "start_time")]
    pub start: NaiveDateTime,
    pub running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_minutes: Option<i64>,
    /// Kept as text so that a single bad value only loses this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<String>,
}

impl Record for TimeLogEntry {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A closed entry's contribution to the productivity reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSpan {
    pub minutes: i64,
    pub stopped_at: NaiveDateTime,
}

impl TimeLogEntry {
    pub fn is_closed(&self) -> bool {
        self.elapsed_minutes.is_some() && self.stopped_at.is_some()
    }

    /// `None` while running; `Some(Err)` when `stopped_at` does not parse.
    pub fn closed_span(&self) -> Option<Result<ClosedSpan, TimestampError>> {
        let minutes = self.elapsed_minutes?;
        let stopped_at = self.stopped_at.as_deref()?;
        Some(timestamp::parse(stopped_at).map(|stopped_at| ClosedSpan { minutes, stopped_at }))
    }
}

/// Result of a stop request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopOutcome {
    Stopped { task_id: i64, minutes: i64 },
    NoRunningTimer { error: String },
}

/// Append a running entry for `task_id`.
pub fn start(logs: &mut Vec<TimeLogEntry>, task_id: i64, now: NaiveDateTime) -> TimeLogEntry {
    let entry = TimeLogEntry {
        id: next_id(logs),
        task_id,
        start: now,
        running: true,
        elapsed_minutes: None,
        stopped_at: None,
    };
    logs.push(entry.clone());
    entry
}

/// Close the newest running entry for `task_id`.
///
/// Elapsed time is whole minutes, rounded down, never negative.
pub fn stop(logs: &mut [TimeLogEntry], task_id: i64, now: NaiveDateTime) -> StopOutcome {
    let Some(entry) = logs
        .iter_mut()
        .rev()
        .find(|e| e.task_id == task_id && e.running)
    else {
        return StopOutcome::NoRunningTimer {
            error: NO_RUNNING_TIMER.to_string(),
        };
    };

    let minutes = (now - entry.start).num_minutes().max(0);
    entry.running = false;
    entry.elapsed_minutes = Some(minutes);
    entry.stopped_at = Some(timestamp::format(now));

    StopOutcome::Stopped { task_id, minutes }
}

/// Starts are written as text; older files stored epoch seconds.
mod start_time {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::timestamp;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStart {
        Epoch(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        at.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        match RawStart::deserialize(deserializer)? {
            RawStart::Epoch(secs) => {
                let nanos = (secs.fract() * 1e9) as u32;
                DateTime::from_timestamp(secs.trunc() as i64, nanos)
                    .map(|utc| utc.with_timezone(&Local).naive_local())
                    .ok_or_else(|| serde::de::Error::custom(format!("epoch start out of range: {secs}")))
            }
            RawStart::Text(text) => timestamp::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}
