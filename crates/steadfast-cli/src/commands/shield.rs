use clap::{Subcommand, ValueEnum};
use serde_json::json;
use steadfast_core::{BlockedKind, Destination, ShieldPreferences, ShieldToggle};

use super::{boot, open_db, print_json, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum ToggleArg {
    Shield,
    Websites,
    Apps,
    Dns,
}

impl From<ToggleArg> for ShieldToggle {
    fn from(arg: ToggleArg) -> Self {
        match arg {
            ToggleArg::Shield => ShieldToggle::Shield,
            ToggleArg::Websites => ShieldToggle::WebsiteBlocking,
            ToggleArg::Apps => ShieldToggle::AppBlocking,
            ToggleArg::Dns => ShieldToggle::DnsFiltering,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Website,
    App,
}

impl From<KindArg> for BlockedKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Website => BlockedKind::Website,
            KindArg::App => BlockedKind::App,
        }
    }
}

#[derive(Subcommand)]
pub enum ShieldAction {
    /// Print toggles and block lists
    Show,
    /// Turn a protection on
    Enable {
        #[arg(value_enum)]
        toggle: ToggleArg,
    },
    /// Turn a protection off
    Disable {
        #[arg(value_enum)]
        toggle: ToggleArg,
    },
    /// Add a website or app to the block list
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        name: String,
    },
    /// Remove a block list entry by id
    Remove {
        id: String,
    },
}

pub fn run(action: ShieldAction) -> CliResult {
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::ContentShield)?;
    let mut prefs = ShieldPreferences::load(&db);

    match action {
        ShieldAction::Show => return print_json(&prefs),
        ShieldAction::Enable { toggle } => prefs.set(toggle.into(), true),
        ShieldAction::Disable { toggle } => prefs.set(toggle.into(), false),
        ShieldAction::Add { kind, name } => {
            let Some(item) = prefs.add(kind.into(), &name).cloned() else {
                tracing::debug!("ignoring blank block list entry");
                return print_json(&prefs);
            };
            prefs.save(&db)?;
            return print_json(&item);
        }
        ShieldAction::Remove { id } => {
            let removed = prefs.remove_any(&id);
            if removed.is_none() {
                return Err(format!("no block list entry with id {id}").into());
            }
            prefs.save(&db)?;
            return print_json(&json!({ "removed": id, "type": removed }));
        }
    }

    prefs.save(&db)?;
    print_json(&prefs)
}
