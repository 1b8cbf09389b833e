use clap::Subcommand;
use univassist_core::Workspace;

use super::print_json;

#[derive(Subcommand)]
pub enum NotifyAction {
    /// List notifications
    List,
}

pub fn run(workspace: &Workspace, action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        NotifyAction::List => print_json(&workspace.list_notifications()),
    }
}
