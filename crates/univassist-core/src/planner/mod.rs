//! Study planning.
//!
//! Two planners share the same block layout rule (blocks back to back with a
//! fixed break between them):
//! - [`StudyPlanAllocator`]: multi-day, capped minutes per day, drains each
//!   work item's remaining time across days
//! - [`legacy_plan`]: today only, one block per task for its full estimate

mod allocator;
mod legacy;

pub use allocator::{
    DayPlan, ScheduleBlock, StudyPlanAllocator, StudyPlanRequest, WorkItem, SUBJECT_ID_OFFSET,
};
pub use legacy::{legacy_plan, LegacyBlock};

use crate::error::ValidationError;

/// Minutes between consecutive blocks unless configured otherwise.
pub const DEFAULT_BREAK_MINUTES: i64 = 10;

/// Longest study plan, in days.
pub const MAX_PLAN_DAYS: u32 = 366;

/// A day's study budget cannot exceed the day itself.
pub const MAX_MINUTES_PER_DAY: i64 = 24 * 60;

/// Block end or next cursor fell outside the representable calendar.
fn out_of_calendar() -> ValidationError {
    ValidationError::InvalidValue {
        field: "schedule".to_string(),
        message: "block times fall outside the supported date range".to_string(),
    }
}
