use clap::Subcommand;
use univassist_core::Workspace;

use super::print_json;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a timer for a task
    Start {
        /// Task ID to track
        task_id: i64,
    },
    /// Stop the most recent running timer for a task
    Stop {
        /// Task ID to stop
        task_id: i64,
    },
}

pub fn run(workspace: &Workspace, action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Start { task_id } => {
            let entry = workspace.start_timer(task_id)?;
            print_json(&entry)
        }
        // A stop with nothing running prints the error payload and still succeeds.
        TimerAction::Stop { task_id } => print_json(&workspace.stop_timer(task_id)?),
    }
}
