use clap::Subcommand;
use univassist_core::{StudyPlanRequest, Workspace};

use super::print_json;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Lay out every task today, back to back
    Today,
    /// Multi-day study plan from tasks or free-text subjects
    Study {
        /// Days to plan (default: planner.default_days)
        #[arg(long)]
        days: Option<u32>,
        /// Study hours per day (default: planner.default_hours_per_day)
        #[arg(long)]
        hours: Option<u32>,
        /// First block hour, 0-23 (default: planner.default_start_hour)
        #[arg(long)]
        start_hour: Option<u32>,
        /// Subject to plan instead of tasks; repeat for several
        #[arg(long = "subject")]
        subjects: Vec<String>,
    },
}

pub fn run(workspace: &Workspace, action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Today => print_json(&workspace.legacy_plan()?),
        PlanAction::Study {
            days,
            hours,
            start_hour,
            subjects,
        } => {
            let plan = workspace.study_plan(StudyPlanRequest {
                days,
                hours_per_day: hours,
                subjects: Some(subjects),
                start_hour,
            })?;
            print_json(&plan)
        }
    }
}
