use serde::Serialize;
use steadfast_core::content::random_quote;
use steadfast_core::streak::DashboardSummary;
use steadfast_core::{chat, Config, Event, Screen, StreakData};

use super::{boot, open_db, print_json, CliResult};

#[derive(Serialize)]
struct Status<'a> {
    screen: Screen,
    has_seen_onboarding: bool,
    is_authenticated: bool,
    streak: StreakData,
    /// Milestones crossed since the last check-in.
    events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dashboard: Option<DashboardSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<&'a str>,
}

pub fn run() -> CliResult {
    let config = Config::load_or_default();
    let db = open_db()?;
    let mut app = boot(&db)?;
    let events = app.refresh()?;

    let on_dashboard = app.screen() == Screen::Dashboard;
    let mut rng = chat::reply_rng(config.chat.seed);
    let status = Status {
        screen: app.screen(),
        has_seen_onboarding: app.has_seen_onboarding(),
        is_authenticated: app.is_authenticated(),
        streak: *app.streak(),
        events,
        dashboard: on_dashboard.then(|| app.dashboard(&config.ui)),
        quote: on_dashboard.then(|| random_quote(&mut rng)),
    };
    print_json(&status)
}
