use super::{boot, open_db, print_json, CliResult};

pub fn run() -> CliResult {
    let db = open_db()?;
    let app = boot(&db)?;
    print_json(app.streak())
}
