//! Task management commands for CLI.

use clap::Subcommand;
use univassist_core::{NewTask, TaskPriority, TaskStatus, Workspace};

use super::print_json;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Estimated minutes (default: 60)
        #[arg(long)]
        estimate: Option<i64>,
        /// Priority: low, medium or high (default: medium)
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    /// List tasks
    List {
        /// Filter by status: todo, in_progress or done
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Change a task's status
    Status {
        /// Task ID
        id: i64,
        /// New status: todo, in_progress or done
        status: TaskStatus,
    },
}

pub fn run(workspace: &Workspace, action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TaskAction::Create {
            title,
            description,
            estimate,
            priority,
        } => {
            let task = workspace.create_task(NewTask {
                title,
                description,
                estimated_minutes: estimate,
                priority,
            })?;
            print_json(&task)
        }
        TaskAction::List { status } => print_json(&workspace.list_tasks(status)),
        TaskAction::Status { id, status } => {
            let task = workspace.set_task_status(id, status)?;
            print_json(&task)
        }
    }
}
