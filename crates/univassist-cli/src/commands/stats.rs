use clap::Subcommand;
use univassist_core::Workspace;

use super::print_json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Minutes per weekday across all logged weeks
    Week,
    /// Minutes per date over the last seven days
    Full,
}

pub fn run(workspace: &Workspace, action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Week => print_json(&workspace.weekly_productivity()),
        StatsAction::Full => print_json(&workspace.full_productivity()),
    }
}
