use clap::Subcommand;
use univassist_core::Workspace;

use super::print_json;

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send a message
    Say {
        /// Message text
        message: String,
        /// Reply mode: study, tasks, mentor or motivation
        #[arg(long)]
        mode: Option<String>,
    },
}

pub fn run(workspace: &Workspace, action: ChatAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ChatAction::Say { message, mode: None } => print_json(&workspace.chat(&message)),
        ChatAction::Say {
            message,
            mode: Some(mode),
        } => print_json(&workspace.chat_in_mode(&message, Some(&mode))),
    }
}
