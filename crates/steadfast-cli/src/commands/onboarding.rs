use clap::Subcommand;
use serde_json::json;
use steadfast_core::onboarding::{Carousel, ONBOARDING_STEPS};

use super::{boot, open_db, print_json, CliResult};

#[derive(Subcommand)]
pub enum OnboardingAction {
    /// Print the carousel steps
    Show {
        /// Only this step (1-based)
        #[arg(long)]
        step: Option<usize>,
    },
    /// Walk through every step and finish onboarding
    Complete,
    /// Finish onboarding without reading the steps
    Skip,
}

pub fn run(action: OnboardingAction) -> CliResult {
    match action {
        OnboardingAction::Show { step: None } => print_json(&ONBOARDING_STEPS),
        OnboardingAction::Show { step: Some(n) } => {
            let step = n
                .checked_sub(1)
                .and_then(|i| ONBOARDING_STEPS.get(i))
                .ok_or_else(|| format!("step must be 1..={}", ONBOARDING_STEPS.len()))?;
            print_json(step)
        }
        OnboardingAction::Complete => {
            let mut carousel = Carousel::new();
            let mut seen = Vec::new();
            while let Some(step) = carousel.current() {
                seen.push(step.title);
                carousel.next();
            }
            finish(carousel, seen)
        }
        OnboardingAction::Skip => {
            let mut carousel = Carousel::new();
            carousel.skip();
            finish(carousel, Vec::new())
        }
    }
}

fn finish(carousel: Carousel, seen: Vec<&str>) -> CliResult {
    debug_assert!(carousel.is_completed());
    let db = open_db()?;
    let mut app = boot(&db)?;
    let events = app.complete_onboarding()?;
    print_json(&json!({
        "steps_seen": seen,
        "status": carousel.status(),
        "events": events,
    }))
}
