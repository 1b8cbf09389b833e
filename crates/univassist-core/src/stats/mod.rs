//! Statistics module for univassist
//!
//! This module turns closed time-log entries into bar-chart style
//! productivity reports.

mod productivity;

pub use productivity::{
    bar_for_minutes, DailyMinutes, ProductivityAggregator, ProductivityReport, SATURATION_MINUTES,
    WEEKDAY_LABELS,
};
