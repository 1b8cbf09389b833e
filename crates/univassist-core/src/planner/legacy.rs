//! Single-day planner.
//!
//! Lays every task out back to back from a fixed hour, one block per task
//! for its full estimate, with no day boundary and no budget.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::out_of_calendar;
use crate::error::ValidationError;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyBlock {
    pub task_id: i64,
    pub title: String,
    #[serde(with = "clock_time")]
    pub start: NaiveTime,
    #[serde(with = "clock_time")]
    pub end: NaiveTime,
}

/// Plan `tasks` on `today` starting at `start_hour:00`.
///
/// Times past midnight wrap around the clock, as a wall clock would show them.
/// A negative break counts as no break.
///
/// # Errors
/// Returns a validation error if `start_hour` is past 23 or an estimate
/// pushes a block outside chrono's calendar.
pub fn legacy_plan(
    tasks: &[Task],
    today: NaiveDate,
    start_hour: u32,
    break_minutes: i64,
) -> Result<Vec<LegacyBlock>, ValidationError> {
    let Some(mut cursor) = today.and_hms_opt(start_hour, 0, 0) else {
        return Err(ValidationError::out_of_range("start_hour", start_hour.into(), 0, 23));
    };
    let pause = TimeDelta::try_minutes(break_minutes.max(0)).ok_or_else(out_of_calendar)?;

    tasks
        .iter()
        .map(|task| {
            let end = TimeDelta::try_minutes(task.estimated_minutes.max(0))
                .and_then(|span| cursor.checked_add_signed(span))
                .ok_or_else(out_of_calendar)?;
            let block = LegacyBlock {
                task_id: task.id,
                title: task.title.clone(),
                start: cursor.time(),
                end: end.time(),
            };
            cursor = end.checked_add_signed(pause).ok_or_else(out_of_calendar)?;
            Ok(block)
        })
        .collect()
}

/// Legacy blocks serialize as `HH:MM`.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(at: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&at.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::DEFAULT_BREAK_MINUTES;
    use crate::task::{TaskPriority, TaskStatus};

    fn task(id: i64, title: &str, minutes: i64) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            estimated_minutes: minutes,
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
        }
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    #[test]
    fn test_back_to_back_with_break() {
        let tasks = vec![task(1, "A", 30), task(2, "B", 20)];
        let plan = legacy_plan(&tasks, today(), 9, DEFAULT_BREAK_MINUTES).unwrap();

        assert_eq!(
            plan,
            vec![
                LegacyBlock { task_id: 1, title: "A".into(), start: hm(9, 0), end: hm(9, 30) },
                LegacyBlock { task_id: 2, title: "B".into(), start: hm(9, 40), end: hm(10, 0) },
            ]
        );
    }

    #[test]
    fn test_wire_format() {
        let plan = legacy_plan(&[task(1, "A", 30)], today(), 9, DEFAULT_BREAK_MINUTES).unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"task_id": 1, "title": "A", "start": "09:00", "end": "09:30"}])
        );
    }

    #[test]
    fn test_whole_estimate_in_one_block() {
        let plan = legacy_plan(&[task(1, "Long", 300)], today(), 9, DEFAULT_BREAK_MINUTES).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].end, hm(14, 0));
    }

    #[test]
    fn test_wraps_past_midnight() {
        let tasks = vec![task(1, "Late", 90), task(2, "Later", 30)];
        let plan = legacy_plan(&tasks, today(), 23, DEFAULT_BREAK_MINUTES).unwrap();
        assert_eq!(plan[0].end, hm(0, 30));
        assert_eq!(plan[1].start, hm(0, 40));
    }

    #[test]
    fn test_no_tasks() {
        assert!(legacy_plan(&[], today(), 9, DEFAULT_BREAK_MINUTES).unwrap().is_empty());
    }

    #[test]
    fn test_negative_break_counts_as_none() {
        let tasks = vec![task(1, "A", 30), task(2, "B", 20)];
        let plan = legacy_plan(&tasks, today(), 9, -45).unwrap();
        assert_eq!(plan[1].start, hm(9, 30));
        assert_eq!(plan[1].end, hm(9, 50));
    }

    #[test]
    fn test_rejects_hour_past_23() {
        let err = legacy_plan(&[task(1, "A", 30)], today(), 24, DEFAULT_BREAK_MINUTES).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, value: 24, .. } if field == "start_hour"));
    }

    #[test]
    fn test_huge_estimate_is_an_error() {
        let tasks = vec![task(1, "Forever", i64::MAX)];
        assert!(legacy_plan(&tasks, today(), 9, DEFAULT_BREAK_MINUTES).is_err());

        let err = legacy_plan(&[task(1, "A", 30)], today(), 9, i64::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }
}
