//! # UnivAssist Core Library
//!
//! Core logic for the UnivAssist study assistant: a task ledger, a mood
//! journal, study timers, goals and two planning/aggregation algorithms.
//! The `univassist` binary exposes every operation both as a CLI subcommand
//! and over HTTP; both go through the same [`Workspace`].
//!
//! ## Architecture
//!
//! - **Storage**: one JSON array file per collection in the data directory,
//!   rewritten in full on every change, plus a TOML configuration
//! - **Planner**: greedy multi-day study plan allocation and the single-day
//!   legacy plan
//! - **Stats**: weekday and calendar-window productivity reports over
//!   closed time-log entries
//!
//! ## Key Components
//!
//! - [`Workspace`]: facade over the data directory
//! - [`StudyPlanAllocator`]: multi-day greedy allocator
//! - [`ProductivityAggregator`]: bar-chart productivity reports
//! - [`RecordStore`]: per-collection JSON persistence

pub mod chat;
pub mod error;
pub mod goals;
pub mod mood;
pub mod notifications;
pub mod planner;
pub mod quotes;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timelog;
pub mod timestamp;
pub mod workspace;

pub use chat::{ChatMode, ChatReply, ChatRequest};
pub use error::{ConfigError, CoreError, StoreError, TimestampError, ValidationError};
pub use goals::{Goal, GoalPatch, NewGoal};
pub use mood::{MoodDay, MoodEntry, NewMood};
pub use notifications::Notification;
pub use planner::{DayPlan, LegacyBlock, ScheduleBlock, StudyPlanAllocator, StudyPlanRequest, WorkItem};
pub use stats::{DailyMinutes, ProductivityAggregator, ProductivityReport};
pub use storage::{Config, Record, RecordStore};
pub use task::{NewTask, Task, TaskPriority, TaskStatus};
pub use timelog::{StopOutcome, TimeLogEntry};
pub use workspace::Workspace;
