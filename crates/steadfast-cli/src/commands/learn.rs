use clap::Subcommand;
use serde_json::json;
use steadfast_core::content::{current_phase, BENEFITS, RECOVERY_TIMELINE};
use steadfast_core::Destination;

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum LearnAction {
    /// Benefits of staying the course
    Benefits,
    /// What to expect, phase by phase
    Timeline,
}

pub fn run(action: LearnAction) -> CliResult {
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::Education)?;

    match action {
        LearnAction::Benefits => print_json(&BENEFITS),
        LearnAction::Timeline => {
            let current = current_phase(app.streak().current_streak).map(|p| p.title);
            print_json(&json!({
                "phases": RECOVERY_TIMELINE,
                "current_phase": current,
            }))
        }
    }
}
