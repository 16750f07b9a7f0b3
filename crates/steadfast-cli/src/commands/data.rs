use clap::Subcommand;
use steadfast_core::storage::data_dir;
use steadfast_core::{Config, Destination};

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Print the data directory
    Path,
    /// Erase every stored record and start over
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    match action {
        DataAction::Path => {
            println!("{}", data_dir()?.display());
        }
        DataAction::Delete { yes } => {
            if !yes {
                return Err("refusing to delete all data without --yes".into());
            }
            let db = open_db()?;
            let mut app = boot(&db)?;
            app.open(Destination::Settings)?;
            let events = app.delete_all_data()?;
            // The PIN and app lock live in the config file, not the store.
            Config::default().save()?;
            tracing::info!("config reset to defaults");
            print_json(&events)?;
        }
    }
    Ok(())
}
