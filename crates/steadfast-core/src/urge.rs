//! Urge control tools: the "wait it out" countdown, box breathing, and the
//! reminder list.
//!
//! Neither tool owns a thread. The countdown advances on `tick()` calls (one
//! per second); breathing phases are derived from wall-clock time since the
//! exercise started.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REMINDERS: [&str; 5] = [
    "Remember why you started",
    "This urge will pass in 10-15 minutes",
    "You've come so far already",
    "Your future self is counting on you",
    "Every urge you resist makes you stronger",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Ready,
    Running,
    /// Reached zero. Terminal until restarted.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u32,
    remaining_secs: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            state: CountdownState::Ready,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_finished(&self) -> bool {
        self.state == CountdownState::Finished
    }

    /// Start (or restart) from the full length.
    pub fn start(&mut self) {
        self.remaining_secs = self.total_secs;
        self.state = if self.total_secs == 0 {
            CountdownState::Finished
        } else {
            CountdownState::Running
        };
    }

    /// Advance one second. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = CountdownState::Finished;
            return true;
        }
        false
    }

    /// Close the tool: stop and rewind.
    pub fn close(&mut self) {
        self.remaining_secs = self.total_secs;
        self.state = CountdownState::Ready;
    }

    /// 0.0 .. 1.0 of the countdown elapsed.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_secs) / f64::from(self.total_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    const CYCLE: [BreathPhase; 3] = [BreathPhase::Inhale, BreathPhase::Hold, BreathPhase::Exhale];

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in deeply",
            BreathPhase::Hold => "Hold your breath",
            BreathPhase::Exhale => "Breathe out slowly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingExercise {
    started_at: DateTime<Utc>,
    phase_secs: u32,
}

impl BreathingExercise {
    pub fn new(started_at: DateTime<Utc>, phase_secs: u32) -> Self {
        Self {
            started_at,
            phase_secs: phase_secs.max(1),
        }
    }

    pub fn phase_secs(&self) -> u32 {
        self.phase_secs
    }

    fn phases_elapsed(&self, now: DateTime<Utc>) -> i64 {
        let secs = (now - self.started_at).num_seconds().max(0);
        secs / i64::from(self.phase_secs)
    }

    pub fn phase_at(&self, now: DateTime<Utc>) -> BreathPhase {
        let idx = self.phases_elapsed(now).rem_euclid(3) as usize;
        BreathPhase::CYCLE[idx]
    }

    /// Completed inhale-hold-exhale cycles.
    pub fn cycles_completed(&self, now: DateTime<Utc>) -> u32 {
        u32::try_from(self.phases_elapsed(now) / 3).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn countdown_runs_to_terminal_state() {
        let mut countdown = Countdown::new(3);
        assert_eq!(countdown.state(), CountdownState::Ready);
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining_secs(), 3);

        countdown.start();
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert!(countdown.is_finished());
        assert_eq!(countdown.remaining_secs(), 0);

        assert!(!countdown.tick());
        assert_eq!(countdown.remaining_secs(), 0);
        assert_eq!(countdown.progress(), 1.0);
    }

    #[test]
    fn countdown_close_rewinds() {
        let mut countdown = Countdown::new(60);
        countdown.start();
        for _ in 0..10 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining_secs(), 50);
        countdown.close();
        assert_eq!(countdown.state(), CountdownState::Ready);
        assert_eq!(countdown.remaining_secs(), 60);
        assert!(!countdown.tick());
    }

    #[test]
    fn countdown_restart_after_finish() {
        let mut countdown = Countdown::new(1);
        countdown.start();
        assert!(countdown.tick());
        countdown.start();
        assert_eq!(countdown.state(), CountdownState::Running);
        assert_eq!(countdown.remaining_secs(), 1);
    }

    #[test]
    fn breathing_cycles_through_phases() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ex = BreathingExercise::new(start, 4);
        assert_eq!(ex.phase_at(start), BreathPhase::Inhale);
        assert_eq!(ex.phase_at(start + Duration::seconds(3)), BreathPhase::Inhale);
        assert_eq!(ex.phase_at(start + Duration::seconds(4)), BreathPhase::Hold);
        assert_eq!(ex.phase_at(start + Duration::seconds(8)), BreathPhase::Exhale);
        assert_eq!(ex.phase_at(start + Duration::seconds(12)), BreathPhase::Inhale);
        assert_eq!(ex.cycles_completed(start + Duration::seconds(25)), 2);
    }

    #[test]
    fn breathing_before_start_is_inhale() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ex = BreathingExercise::new(start, 4);
        assert_eq!(ex.phase_at(start - Duration::seconds(30)), BreathPhase::Inhale);
    }

    #[test]
    fn phase_next_matches_cycle() {
        let mut phase = BreathPhase::Inhale;
        for expected in [BreathPhase::Hold, BreathPhase::Exhale, BreathPhase::Inhale] {
            phase = phase.next();
            assert_eq!(phase, expected);
        }
    }
}
