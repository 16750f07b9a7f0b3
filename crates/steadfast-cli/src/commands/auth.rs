use clap::Subcommand;
use steadfast_core::AuthMethod;

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with an email address
    Email {
        address: String,
    },
    /// Continue without an account
    Anonymous,
}

pub fn run(action: AuthAction) -> CliResult {
    let method = match action {
        AuthAction::Email { address } => AuthMethod::Email { address },
        AuthAction::Anonymous => AuthMethod::Anonymous,
    };

    let db = open_db()?;
    let mut app = boot(&db)?;
    let events = app.authenticate(method)?;
    print_json(&events)
}
