//! Read-only notification feed, seeded on first run.

use serde::{Deserialize, Serialize};

use crate::storage::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub text: String,
    pub time: String,
}

impl Record for Notification {
    fn id(&self) -> i64 {
        self.id
    }
}
