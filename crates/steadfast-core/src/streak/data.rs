//! The streak record and its derivation rules.
//!
//! `current_streak` is never edited by hand: it is a pure function of
//! `(now, start_date, last_relapse_date)`. Whole days are counted by truncating
//! the millisecond delta, so crossing local midnight alone never adds a day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one streak day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Whole 24-hour periods from `from` to `to`, clamped at zero.
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let ms = (to - from).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    u32::try_from(ms / MS_PER_DAY).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_relapse_date: Option<DateTime<Utc>>,
}

impl StreakData {
    /// A fresh record starting at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            start_date: now,
            last_relapse_date: None,
        }
    }

    /// The instant the current streak counts from.
    pub fn reference_point(&self) -> DateTime<Utc> {
        self.last_relapse_date.unwrap_or(self.start_date)
    }

    /// Derive `current_streak` from wall-clock time and fold it into the best.
    #[must_use]
    pub fn recompute(&self, now: DateTime<Utc>) -> Self {
        let days = elapsed_days(self.reference_point(), now);
        Self {
            current_streak: days,
            longest_streak: self.longest_streak.max(days),
            ..*self
        }
    }

    /// Record a relapse at `now`.
    ///
    /// The historical best is carried over untouched. A `now` earlier than
    /// `start_date` is clamped so the relapse never precedes the start.
    #[must_use]
    pub fn reset(&self, now: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            longest_streak: self.longest_streak,
            start_date: self.start_date,
            last_relapse_date: Some(now.max(self.start_date)),
        }
    }

    /// Whether the record satisfies the model's structural rules.
    pub fn is_consistent(&self) -> bool {
        self.last_relapse_date
            .map_or(true, |relapse| relapse >= self.start_date)
            && self.longest_streak >= self.current_streak
    }

    pub fn has_relapsed(&self) -> bool {
        self.last_relapse_date.is_some()
    }
}
