use clap::Subcommand;
use serde_json::json;
use steadfast_core::{Config, Destination};

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings
    Show,
    /// Record a relapse and start counting from now
    ResetStreak {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Set the app lock PIN (4-6 digits)
    Pin {
        pin: String,
    },
    /// Turn the app lock on or off
    AppLock {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Turn dark mode on or off
    DarkMode {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

pub fn run(action: SettingsAction) -> CliResult {
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::Settings)?;
    let mut config = Config::load()?;

    match action {
        SettingsAction::Show => {}
        SettingsAction::ResetStreak { yes } => {
            if !yes {
                return Err("refusing to reset the streak without --yes".into());
            }
            let events = app.reset_streak()?;
            return print_json(&events);
        }
        SettingsAction::Pin { pin } => config.set("security.pin", &pin)?,
        SettingsAction::AppLock { enabled } => {
            config.set("security.app_lock_enabled", &enabled.to_string())?
        }
        SettingsAction::DarkMode { enabled } => config.set("ui.dark_mode", &enabled.to_string())?,
    }

    print_json(&json!({
        "dark_mode": config.ui.dark_mode,
        "app_lock_enabled": config.security.app_lock_enabled,
        "pin_set": !config.security.pin.is_empty(),
    }))
}
