//! Data-directory-backed facade over every collection.
//!
//! A [`Workspace`] is opened once per process from a data directory. It owns
//! the configuration and one [`RecordStore`] per collection, and exposes each
//! user-facing operation as a method. Every mutating method loads the
//! collection, changes it and writes it back in full.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::chat::{self, ChatReply};
use crate::error::{Result, ValidationError};
use crate::goals::{Goal, GoalPatch, NewGoal};
use crate::mood::{self, MoodDay, MoodEntry, NewMood, DEFAULT_INTENSITY};
use crate::notifications::Notification;
use crate::planner::{
    self, DayPlan, LegacyBlock, StudyPlanAllocator, StudyPlanRequest, WorkItem, MAX_PLAN_DAYS,
};
use crate::quotes;
use crate::stats::{ProductivityAggregator, ProductivityReport};
use crate::storage::{self, next_id, seed, Config, RecordStore};
use crate::task::{self, NewTask, Task, TaskStatus};
use crate::timelog::{self, StopOutcome, TimeLogEntry};
use crate::timestamp;
use crate::CoreError;

/// Source of the current local time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub struct Workspace {
    dir: PathBuf,
    config: Config,
    clock: Clock,
    tasks: RecordStore<Task>,
    moods: RecordStore<MoodEntry>,
    timelogs: RecordStore<TimeLogEntry>,
    quotes: RecordStore<String>,
    goals: RecordStore<Goal>,
    notifications: RecordStore<Notification>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("dir", &self.dir)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Open the workspace in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot
    /// be loaded or the seed collections cannot be written.
    pub fn open() -> Result<Self> {
        let dir = storage::data_dir()?;
        Self::open_at(&dir)
    }

    /// Open the workspace rooted at `dir`, seeding defaults on first use.
    ///
    /// # Errors
    /// See [`Workspace::open`].
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let config = Config::load(dir)?;

        let workspace = Self {
            dir: dir.to_path_buf(),
            config,
            clock: Arc::new(|| Local::now().naive_local()),
            tasks: RecordStore::new(dir, "tasks"),
            moods: RecordStore::new(dir, "mood"),
            timelogs: RecordStore::new(dir, "timelogs"),
            quotes: RecordStore::new(dir, "quotes"),
            goals: RecordStore::new(dir, "goals"),
            notifications: RecordStore::new(dir, "notifications"),
        };
        workspace.seed_defaults()?;
        Ok(workspace)
    }

    /// Replace the wall clock, mainly for tests.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Fill quotes, goals and notifications with defaults when absent or empty.
    ///
    /// # Errors
    /// Returns an error if a seeded collection cannot be written.
    pub fn seed_defaults(&self) -> Result<()> {
        if self.quotes.load().is_empty() {
            info!(collection = self.quotes.name(), "seeding defaults");
            self.quotes.save(&seed::default_quotes())?;
        }
        if self.goals.load().is_empty() {
            info!(collection = self.goals.name(), "seeding defaults");
            self.goals.save(&seed::default_goals())?;
        }
        if self.notifications.load().is_empty() {
            info!(collection = self.notifications.name(), "seeding defaults");
            self.notifications
                .save(&seed::default_notifications(self.now()))?;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    // Tasks

    /// # Errors
    /// Returns a validation error for a negative estimate, or a store error
    /// if the ledger cannot be written.
    pub fn create_task(&self, new: NewTask) -> Result<Task> {
        let mut tasks = self.tasks.load();
        let task = new.into_task(next_id(&tasks))?;
        tasks.push(task.clone());
        self.tasks.save(&tasks)?;
        Ok(task)
    }

    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Vec<Task> {
        task::filter_by_status(self.tasks.load(), status)
    }

    /// # Errors
    /// Returns [`CoreError::NotFound`] if no task has `id`.
    pub fn set_task_status(&self, id: i64, status: TaskStatus) -> Result<Task> {
        let mut tasks = self.tasks.load();
        let updated = task::set_status(&mut tasks, id, status)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        self.tasks.save(&tasks)?;
        Ok(updated)
    }

    // Planning

    /// Today's single-day plan over every task.
    pub fn legacy_plan(&self) -> Result<Vec<LegacyBlock>> {
        let planner = &self.config.planner;
        let plan = planner::legacy_plan(
            &self.tasks.load(),
            self.today(),
            planner.legacy_start_hour,
            planner.break_minutes,
        )?;
        Ok(plan)
    }

    /// Multi-day plan starting today.
    ///
    /// Non-empty `subjects` replace the task pool; otherwise every task is
    /// drawn in ledger order for its full estimate.
    ///
    /// # Errors
    /// Returns a validation error if `days` is outside 1..=366,
    /// `hours_per_day` is past 24 or `start_hour` is past 23.
    pub fn study_plan(&self, request: StudyPlanRequest) -> Result<Vec<DayPlan>> {
        let defaults = &self.config.planner;
        let days = request.days.unwrap_or(defaults.default_days);
        let hours = request.hours_per_day.unwrap_or(defaults.default_hours_per_day);
        let start_hour = request.start_hour.unwrap_or(defaults.default_start_hour);

        if !(1..=MAX_PLAN_DAYS).contains(&days) {
            return Err(ValidationError::out_of_range("days", days.into(), 1, MAX_PLAN_DAYS.into()).into());
        }
        if hours > 24 {
            return Err(ValidationError::out_of_range("hours_per_day", hours.into(), 0, 24).into());
        }
        let minutes_per_day = i64::from(hours) * 60;

        let mut items = match request.subjects.as_deref() {
            Some(subjects) if !subjects.is_empty() => {
                WorkItem::from_subjects(subjects, days, minutes_per_day)
            }
            _ => self.tasks.load().iter().map(WorkItem::from_task).collect(),
        };

        let plan = StudyPlanAllocator::with_break(defaults.break_minutes).allocate(
            &mut items,
            days,
            minutes_per_day,
            start_hour,
            self.today(),
        )?;
        Ok(plan)
    }

    // Timers

    /// # Errors
    /// Returns a store error if the time log cannot be written.
    pub fn start_timer(&self, task_id: i64) -> Result<TimeLogEntry> {
        let mut logs = self.timelogs.load();
        let entry = timelog::start(&mut logs, task_id, self.now());
        self.timelogs.save(&logs)?;
        Ok(entry)
    }

    /// Close the newest running timer for `task_id`.
    ///
    /// Finding nothing to stop is reported in the outcome, not as an error.
    ///
    /// # Errors
    /// Returns a store error if the time log cannot be written.
    pub fn stop_timer(&self, task_id: i64) -> Result<StopOutcome> {
        let mut logs = self.timelogs.load();
        let outcome = timelog::stop(&mut logs, task_id, self.now());
        if matches!(outcome, StopOutcome::Stopped { .. }) {
            self.timelogs.save(&logs)?;
        }
        Ok(outcome)
    }

    // Mood

    /// # Errors
    /// Returns a store error if the journal cannot be written.
    pub fn log_mood(&self, new: NewMood) -> Result<MoodEntry> {
        let mut moods = self.moods.load();
        let entry = MoodEntry {
            id: next_id(&moods),
            mood: new.mood,
            intensity: new.intensity.unwrap_or(DEFAULT_INTENSITY),
            note: new.note.unwrap_or_default(),
            timestamp: timestamp::format(self.now()),
        };
        moods.push(entry.clone());
        self.moods.save(&moods)?;
        Ok(entry)
    }

    pub fn list_moods(&self) -> Vec<MoodEntry> {
        self.moods.load()
    }

    pub fn mood_last7(&self) -> Vec<MoodDay> {
        mood::recent(&self.moods.load())
    }

    // Productivity

    pub fn weekly_productivity(&self) -> ProductivityReport {
        ProductivityAggregator::new().weekday_report(&self.timelogs.load())
    }

    /// Calendar report over the seven days ending today.
    pub fn full_productivity(&self) -> ProductivityReport {
        ProductivityAggregator::new().calendar_report(&self.timelogs.load(), self.today())
    }

    // Goals

    pub fn list_goals(&self) -> Vec<Goal> {
        self.goals.load()
    }

    /// # Errors
    /// Returns a store error if the goals cannot be written.
    pub fn create_goal(&self, new: NewGoal) -> Result<Goal> {
        let mut goals = self.goals.load();
        let goal = new.into_goal(next_id(&goals));
        goals.push(goal.clone());
        self.goals.save(&goals)?;
        Ok(goal)
    }

    /// # Errors
    /// Returns [`CoreError::NotFound`] if no goal has `id`.
    pub fn update_goal(&self, id: i64, patch: GoalPatch) -> Result<Goal> {
        let mut goals = self.goals.load();
        let goal = goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("goal", id))?;
        patch.apply(goal);
        let updated = goal.clone();
        self.goals.save(&goals)?;
        Ok(updated)
    }

    // Feeds

    pub fn list_notifications(&self) -> Vec<Notification> {
        self.notifications.load()
    }

    pub fn quote_of_day(&self) -> Option<String> {
        let quotes = self.quotes.load();
        quotes::quote_of_day(&quotes, self.today()).map(str::to_string)
    }

    pub fn chat(&self, message: &str) -> ChatReply {
        chat::respond(message)
    }

    pub fn chat_in_mode(&self, message: &str, mode: Option<&str>) -> ChatReply {
        chat::respond_in_mode(message, mode)
    }
}
