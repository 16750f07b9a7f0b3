use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::navigator::Screen;

/// Every session mutation produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    OnboardingCompleted {
        at: DateTime<Utc>,
    },
    Authenticated {
        anonymous: bool,
        at: DateTime<Utc>,
    },
    StreakInitialized {
        start_date: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    StreakReset {
        /// Streak length at the moment of the reset.
        previous_streak: u32,
        longest_streak: u32,
        at: DateTime<Utc>,
    },
    /// A recompute crossed a milestone threshold.
    MilestoneReached {
        days: u32,
        title: String,
        at: DateTime<Utc>,
    },
    ScreenChanged {
        from: Screen,
        to: Screen,
        at: DateTime<Utc>,
    },
    /// Every persisted key was cleared.
    DataDeleted {
        at: DateTime<Utc>,
    },
}
