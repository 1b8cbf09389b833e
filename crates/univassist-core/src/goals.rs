//! Study goals measured in minutes.

use serde::{Deserialize, Serialize};

use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub target_minutes: i64,
    #[serde(default)]
    pub progress_minutes: i64,
}

impl Record for Goal {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub title: String,
    pub target_minutes: i64,
}

impl NewGoal {
    /// New goals start with no progress.
    pub fn into_goal(self, id: i64) -> Goal {
        Goal {
            id,
            title: self.title,
            target_minutes: self.target_minutes,
            progress_minutes: 0,
        }
    }
}

/// Partial update; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPatch {
    #[serde(default)]
    pub progress_minutes: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GoalPatch {
    pub fn apply(self, goal: &mut Goal) {
        if let Some(progress) = self.progress_minutes {
            goal.progress_minutes = progress;
        }
        if let Some(title) = self.title {
            goal.title = title;
        }
    }
}
