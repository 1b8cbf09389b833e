use clap::Subcommand;
use univassist_core::{NewMood, Workspace};

use super::print_json;

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record how you feel
    Log {
        /// Mood label, e.g. "happy"
        mood: String,
        /// Intensity (default: 5)
        #[arg(long)]
        intensity: Option<i64>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },
    /// List every entry
    List,
    /// The last seven entries with their weekday
    Last7,
}

pub fn run(workspace: &Workspace, action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MoodAction::Log {
            mood,
            intensity,
            note,
        } => {
            let entry = workspace.log_mood(NewMood {
                mood,
                intensity,
                note,
            })?;
            print_json(&entry)
        }
        MoodAction::List => print_json(&workspace.list_moods()),
        MoodAction::Last7 => print_json(&workspace.mood_last7()),
    }
}
