//! Task ledger.
//!
//! Tasks are the persisted work items the planner draws from. Creation always
//! starts a task in [`TaskStatus::Todo`]; status changes are free-form between
//! the three states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::storage::Record;

/// Minutes assumed when a task is created without an estimate.
pub const DEFAULT_ESTIMATED_MINUTES: i64 = 60;

/// One week of work.
pub const MAX_ESTIMATED_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub estimated_minutes: i64,
    #[serde(default)]
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Build the stored task under `id`, filling defaults.
    pub fn into_task(self, id: i64) -> Result<Task, ValidationError> {
        let estimated_minutes = self.estimated_minutes.unwrap_or(DEFAULT_ESTIMATED_MINUTES);
        if !(0..=MAX_ESTIMATED_MINUTES).contains(&estimated_minutes) {
            return Err(ValidationError::out_of_range(
                "estimated_minutes",
                estimated_minutes,
                0,
                MAX_ESTIMATED_MINUTES,
            ));
        }

        Ok(Task {
            id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            estimated_minutes,
            priority: self.priority.unwrap_or_default(),
            status: TaskStatus::Todo,
        })
    }
}

/// Tasks matching `status`, or all of them.
pub fn filter_by_status(tasks: Vec<Task>, status: Option<TaskStatus>) -> Vec<Task> {
    match status {
        Some(status) => tasks.into_iter().filter(|t| t.status == status).collect(),
        None => tasks,
    }
}

/// Set the status of task `id`, returning the updated task.
///
/// Returns `None` if no task has that id.
pub fn set_status(tasks: &mut [Task], id: i64, status: TaskStatus) -> Option<Task> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;
    task.status = status;
    Some(task.clone())
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("expected todo, in_progress or done, got '{other}'"),
            }),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("expected low, medium or high, got '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            estimated_minutes: 30,
            priority: TaskPriority::Medium,
            status,
        }
    }

    #[test]
    fn new_task_fills_defaults() {
        let t = NewTask::titled("Read chapter 3").into_task(4).unwrap();
        assert_eq!(t.id, 4);
        assert_eq!(t.description, "");
        assert_eq!(t.estimated_minutes, 60);
        assert_eq!(t.priority, TaskPriority::Medium);
        assert_eq!(t.status, TaskStatus::Todo);
    }

    #[test]
    fn new_task_rejects_negative_estimate() {
        let new = NewTask {
            estimated_minutes: Some(-5),
            ..NewTask::titled("bad")
        };
        assert!(matches!(
            new.into_task(1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn new_task_caps_estimate_at_a_week() {
        let at_cap = NewTask {
            estimated_minutes: Some(MAX_ESTIMATED_MINUTES),
            ..NewTask::titled("long")
        };
        assert!(at_cap.into_task(1).is_ok());

        let huge = NewTask {
            estimated_minutes: Some(i64::MAX),
            ..NewTask::titled("forever")
        };
        assert!(matches!(
            huge.into_task(2),
            Err(ValidationError::OutOfRange { max: MAX_ESTIMATED_MINUTES, .. })
        ));
    }

    #[test]
    fn filter_keeps_order() {
        let tasks = vec![
            task(1, TaskStatus::Done),
            task(2, TaskStatus::Todo),
            task(3, TaskStatus::Done),
        ];
        let done = filter_by_status(tasks.clone(), Some(TaskStatus::Done));
        assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(filter_by_status(tasks, None).len(), 3);
    }

    #[test]
    fn set_status_unknown_id() {
        let mut tasks = vec![task(1, TaskStatus::Todo)];
        assert!(set_status(&mut tasks, 2, TaskStatus::Done).is_none());
        assert_eq!(tasks[0].status, TaskStatus::Todo);

        let updated = set_status(&mut tasks, 1, TaskStatus::InProgress).unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("finished".parse::<TaskStatus>().is_err());
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
    }

    #[test]
    fn reads_records_written_without_optional_fields() {
        let json = r#"{"id": 7, "title": "x", "estimated_minutes": 15, "status": "todo"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, TaskPriority::Medium);
        assert_eq!(t.description, "");
    }
}
