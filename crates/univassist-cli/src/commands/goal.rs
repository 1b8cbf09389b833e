use clap::Subcommand;
use univassist_core::{GoalPatch, NewGoal, Workspace};

use super::print_json;

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals
    List,
    /// Create a goal
    Create {
        /// Goal title
        title: String,
        /// Target in minutes
        #[arg(long)]
        target: i64,
    },
    /// Update a goal's progress or title
    Update {
        /// Goal ID
        id: i64,
        /// Minutes done so far
        #[arg(long)]
        progress: Option<i64>,
        /// New title
        #[arg(long)]
        title: Option<String>,
    },
}

pub fn run(workspace: &Workspace, action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GoalAction::List => print_json(&workspace.list_goals()),
        GoalAction::Create { title, target } => {
            let goal = workspace.create_goal(NewGoal {
                title,
                target_minutes: target,
            })?;
            print_json(&goal)
        }
        GoalAction::Update {
            id,
            progress,
            title,
        } => {
            let goal = workspace.update_goal(
                id,
                GoalPatch {
                    progress_minutes: progress,
                    title,
                },
            )?;
            print_json(&goal)
        }
    }
}
