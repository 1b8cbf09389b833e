//! Mood journal.

use serde::{Deserialize, Serialize};

use crate::storage::Record;
use crate::timestamp;

pub const DEFAULT_INTENSITY: i64 = 5;

/// How many entries the recent-mood view returns.
pub const RECENT_MOODS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Entries written before ids were assigned read back as 0.
    #[serde(default)]
    pub id: i64,
    pub mood: String,
    #[serde(default = "default_intensity")]
    pub intensity: i64,
    #[serde(default)]
    pub note: String,
    pub timestamp: String,
}

impl Record for MoodEntry {
    fn id(&self) -> i64 {
        self.id
    }
}

fn default_intensity() -> i64 {
    DEFAULT_INTENSITY
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMood {
    pub mood: String,
    #[serde(default)]
    pub intensity: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// One row of the recent-mood view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDay {
    /// Weekday abbreviation of `timestamp`, empty if it does not parse.
    pub day: String,
    pub mood: String,
    pub intensity: i64,
    pub timestamp: String,
}

/// The last [`RECENT_MOODS`] entries in logged order, labelled by weekday.
pub fn recent(entries: &[MoodEntry]) -> Vec<MoodDay> {
    let skip = entries.len().saturating_sub(RECENT_MOODS);
    entries[skip..]
        .iter()
        .map(|entry| MoodDay {
            day: timestamp::parse(&entry.timestamp)
                .map(|at| at.format("%a").to_string())
                .unwrap_or_default(),
            mood: entry.mood.clone(),
            intensity: entry.intensity,
            timestamp: entry.timestamp.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, mood: &str, timestamp: &str) -> MoodEntry {
        MoodEntry {
            id,
            mood: mood.to_string(),
            intensity: DEFAULT_INTENSITY,
            note: String::new(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn recent_keeps_last_seven_in_order() {
        let entries: Vec<MoodEntry> = (1..=9)
            .map(|d| entry(d, &format!("m{d}"), &format!("2024-07-{d:02}T08:00:00")))
            .collect();

        let recent = recent(&entries);
        assert_eq!(recent.len(), 7);
        assert_eq!(recent[0].mood, "m3");
        assert_eq!(recent[6].mood, "m9");
        // 2024-07-03 was a Wednesday
        assert_eq!(recent[0].day, "Wed");
    }

    #[test]
    fn recent_labels_unparseable_timestamps_blank() {
        let recent = recent(&[entry(1, "calm", "sometime")]);
        assert_eq!(recent[0].day, "");
        assert_eq!(recent[0].timestamp, "sometime");
    }

    #[test]
    fn legacy_entries_without_id_or_intensity() {
        let json = r#"{"mood": "happy", "note": "", "timestamp": "2024-07-01T08:00:00"}"#;
        let e: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, 0);
        assert_eq!(e.intensity, 5);
    }
}
