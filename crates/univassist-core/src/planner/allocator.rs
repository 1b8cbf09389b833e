//! Multi-day study plan allocation.
//!
//! Work items are drawn greedily in input order. Each day starts at
//! `start_hour:00` with a fresh budget of `minutes_per_day`; an item's
//! remaining time carries over to the following days of the same call.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::{out_of_calendar, DEFAULT_BREAK_MINUTES, MAX_MINUTES_PER_DAY, MAX_PLAN_DAYS};
use crate::error::ValidationError;
use crate::task::Task;

/// Subject work items are numbered from here so they never collide with task ids.
pub const SUBJECT_ID_OFFSET: i64 = 1000;

/// A unit of schedulable work with a remaining-time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: i64,
    pub title: String,
    pub remaining_minutes: i64,
}

impl WorkItem {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            remaining_minutes: task.estimated_minutes.max(0),
        }
    }

    /// One item per subject, splitting the whole multi-day budget evenly
    /// up front: `floor(days * minutes_per_day / subjects.len())` each.
    pub fn from_subjects(subjects: &[String], days: u32, minutes_per_day: i64) -> Vec<Self> {
        if subjects.is_empty() {
            return Vec::new();
        }

        let total = i64::from(days).saturating_mul(minutes_per_day.max(0));
        let per_subject = total / subjects.len() as i64;

        subjects
            .iter()
            .zip(SUBJECT_ID_OFFSET..)
            .map(|(title, id)| Self {
                id,
                title: title.clone(),
                remaining_minutes: per_subject,
            })
            .collect()
    }
}

/// One contiguous span of work on a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub title: String,
    #[serde(with = "block_time")]
    pub start: NaiveDateTime,
    #[serde(with = "block_time")]
    pub end: NaiveDateTime,
    pub minutes: i64,
}

/// The blocks scheduled on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub blocks: Vec<ScheduleBlock>,
}

impl DayPlan {
    pub fn total_minutes(&self) -> i64 {
        self.blocks.iter().map(|b| b.minutes).sum()
    }
}

/// Parameters of a study plan request. Missing values fall back to the
/// planner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyPlanRequest {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub hours_per_day: Option<u32>,
    /// Free-text subjects; when non-empty they replace the task pool.
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub start_hour: Option<u32>,
}

/// Greedy multi-day allocator.
#[derive(Debug, Clone)]
pub struct StudyPlanAllocator {
    break_minutes: i64,
}

impl Default for StudyPlanAllocator {
    fn default() -> Self {
        Self {
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl StudyPlanAllocator {
    /// Create an allocator with the default 10-minute break
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_break(break_minutes: i64) -> Self {
        Self {
            break_minutes: break_minutes.max(0),
        }
    }

    /// Allocate `items` over `days` days starting at `start_date`.
    ///
    /// `items` is drained in place: after the call each item's
    /// `remaining_minutes` holds what did not fit.
    ///
    /// # Errors
    /// Returns a validation error if `days` is outside 1..=366, `start_hour`
    /// is past 23, `minutes_per_day` is outside 0..=1440, or a block would
    /// land outside chrono's calendar.
    pub fn allocate(
        &self,
        items: &mut [WorkItem],
        days: u32,
        minutes_per_day: i64,
        start_hour: u32,
        start_date: NaiveDate,
    ) -> Result<Vec<DayPlan>, ValidationError> {
        if !(1..=MAX_PLAN_DAYS).contains(&days) {
            return Err(ValidationError::out_of_range(
                "days",
                days.into(),
                1,
                MAX_PLAN_DAYS.into(),
            ));
        }
        if start_hour > 23 {
            return Err(ValidationError::out_of_range("start_hour", start_hour.into(), 0, 23));
        }
        if !(0..=MAX_MINUTES_PER_DAY).contains(&minutes_per_day) {
            return Err(ValidationError::out_of_range(
                "minutes_per_day",
                minutes_per_day,
                0,
                MAX_MINUTES_PER_DAY,
            ));
        }
        let pause = TimeDelta::try_minutes(self.break_minutes).ok_or_else(out_of_calendar)?;

        let mut plans = Vec::with_capacity(days as usize);

        for offset in 0..days {
            let date = TimeDelta::try_days(i64::from(offset))
                .and_then(|shift| start_date.checked_add_signed(shift))
                .ok_or_else(out_of_calendar)?;
            let Some(mut cursor) = date.and_hms_opt(start_hour, 0, 0) else {
                return Err(ValidationError::out_of_range("start_hour", start_hour.into(), 0, 23));
            };
            let mut minutes_left = minutes_per_day;
            let mut blocks = Vec::new();

            for item in items.iter_mut() {
                if minutes_left <= 0 {
                    break;
                }
                if item.remaining_minutes <= 0 {
                    continue;
                }

                let take = item.remaining_minutes.min(minutes_left);
                if take <= 0 {
                    continue;
                }

                let end = TimeDelta::try_minutes(take)
                    .and_then(|span| cursor.checked_add_signed(span))
                    .ok_or_else(out_of_calendar)?;
                blocks.push(ScheduleBlock {
                    title: item.title.clone(),
                    start: cursor,
                    end,
                    minutes: take,
                });

                item.remaining_minutes -= take;
                minutes_left -= take;
                cursor = end.checked_add_signed(pause).ok_or_else(out_of_calendar)?;
            }

            plans.push(DayPlan { date, blocks });
        }

        Ok(plans)
    }
}

/// Blocks serialize as `YYYY-MM-DD HH:MM`.
mod block_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&at.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}
