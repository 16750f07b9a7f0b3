pub mod auth;
pub mod chat;
pub mod completions;
pub mod config;
pub mod data;
pub mod goals;
pub mod learn;
pub mod onboarding;
pub mod progress;
pub mod settings;
pub mod shield;
pub mod status;
pub mod streak;
pub mod urge;

use serde::Serialize;
use steadfast_core::{App, Database, SystemClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store.
pub fn open_db() -> Result<Database, Box<dyn std::error::Error>> {
    Ok(Database::open()?)
}

/// Boot a session over `db` on the system clock.
pub fn boot(db: &Database) -> Result<App<'_, Database, SystemClock>, Box<dyn std::error::Error>> {
    Ok(App::boot(db, SystemClock)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
