use serde::Serialize;
use steadfast_core::streak::MilestoneReport;
use steadfast_core::{Destination, Event};

use super::{boot, open_db, print_json, CliResult};

#[derive(Serialize)]
struct Goals {
    #[serde(flatten)]
    report: MilestoneReport,
    events: Vec<Event>,
}

pub fn run() -> CliResult {
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::Goals)?;
    let events = app.refresh()?;
    print_json(&Goals {
        report: app.milestones(),
        events,
    })
}
