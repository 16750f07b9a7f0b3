use std::time::Duration;

use clap::Subcommand;
use serde_json::json;
use steadfast_core::urge::{BreathingExercise, Countdown, REMINDERS};
use steadfast_core::{Config, Destination};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum UrgeAction {
    /// Print the reminder list
    Reminders,
    /// Wait out an urge
    Countdown {
        /// Length in seconds (defaults to urge.countdown_secs)
        #[arg(long)]
        secs: Option<u32>,
        /// Tick without sleeping
        #[arg(long)]
        no_wait: bool,
    },
    /// Guided box breathing
    Breathe {
        #[arg(long, default_value = "3")]
        cycles: u32,
        /// Step through phases without sleeping
        #[arg(long)]
        no_wait: bool,
    },
}

pub fn run(action: UrgeAction) -> CliResult {
    let config = Config::load_or_default();
    let db = open_db()?;
    let mut app = boot(&db)?;
    app.open(Destination::UrgeControl)?;

    match action {
        UrgeAction::Reminders => print_json(&REMINDERS),
        UrgeAction::Countdown { secs, no_wait } => {
            let mut countdown = Countdown::new(secs.unwrap_or(config.urge.countdown_secs));
            countdown.start();
            runtime()?.block_on(async {
                let mut ticker = interval(Duration::from_secs(1));
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // First tick completes immediately.
                ticker.tick().await;
                while !countdown.is_finished() {
                    if !no_wait {
                        ticker.tick().await;
                    }
                    countdown.tick();
                    eprintln!("{}s", countdown.remaining_secs());
                }
            });
            print_json(&countdown)
        }
        UrgeAction::Breathe { cycles, no_wait } => {
            let phase_secs = config.urge.breath_phase_secs;
            let start = app.now();
            let exercise = BreathingExercise::new(start, phase_secs);
            let step = chrono::Duration::seconds(i64::from(exercise.phase_secs()));
            let started = Instant::now();

            runtime()?.block_on(async {
                for n in 0..cycles.saturating_mul(3) {
                    if !no_wait {
                        let offset = Duration::from_secs(u64::from(n) * u64::from(exercise.phase_secs()));
                        sleep_until(started + offset).await;
                    }
                    let at = start + step * i32::try_from(n).unwrap_or(i32::MAX);
                    eprintln!("{}", exercise.phase_at(at).prompt());
                }
            });

            let end = start + step * i32::try_from(cycles.saturating_mul(3)).unwrap_or(i32::MAX);
            print_json(&json!({
                "phase_secs": exercise.phase_secs(),
                "cycles_completed": exercise.cycles_completed(end),
            }))
        }
    }
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
}
