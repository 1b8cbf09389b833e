//! Default content for the collections that start pre-populated.

use chrono::NaiveDateTime;

use crate::goals::Goal;
use crate::notifications::Notification;
use crate::timestamp;

pub fn default_quotes() -> Vec<String> {
    [
        "Consistency beats talent.",
        "Small steps every day lead to big results.",
        "Focus on progress, not perfection.",
        "Believe you can, and you're halfway there.",
        "Discipline builds success — not motivation.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal {
            id: 1,
            title: "Study 10 Hours".to_string(),
            target_minutes: 600,
            progress_minutes: 0,
        },
        Goal {
            id: 2,
            title: "Finish E Tasks".to_string(),
            target_minutes: 120,
            progress_minutes: 0,
        },
    ]
}

/// Seed notifications, all stamped with `now`.
pub fn default_notifications(now: NaiveDateTime) -> Vec<Notification> {
    let time = timestamp::format(now);
    [
        "Your exam is 2 days away",
        "You studied 3 hours today",
        "Practice guitar is due in 6 hours",
    ]
    .into_iter()
    .zip(1..)
    .map(|(text, id)| Notification {
        id,
        text: text.to_string(),
        time: time.clone(),
    })
    .collect()
}
