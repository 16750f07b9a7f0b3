use steadfast_core::Destination;

use super::{boot, open_db, print_json, CliResult};

pub fn run() -> CliResult {
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::Progress)?;
    print_json(&app.progress())
}
