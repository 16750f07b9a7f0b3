//! Session facade.
//!
//! [`App`] boots from the persisted flags, owns the navigator and the live
//! streak record, and is the only place the streak is mutated. Every mutator
//! returns the events it produced.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::navigator::{initial_screen, transition, Destination, NavEvent, Navigator, Screen};
use crate::storage::{keys, load_json, save_json, KeyValueStore, UiConfig};
use crate::streak::milestone::newly_reached;
use crate::streak::{
    evaluate_milestones, DashboardSummary, MilestoneReport, ProgressSummary, StreakData,
    StreakStore,
};

/// How the user signed in. Both methods behave the same; nothing is
/// verified and the address is not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum AuthMethod {
    Email { address: String },
    Anonymous,
}

impl AuthMethod {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            AuthMethod::Email { address } => {
                let address = address.trim();
                let valid = address
                    .split_once('@')
                    .is_some_and(|(user, host)| !user.is_empty() && !host.is_empty());
                if valid {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidValue {
                        field: "email".into(),
                        message: format!("'{address}' is not an email address"),
                    })
                }
            }
            AuthMethod::Anonymous => Ok(()),
        }
    }
}

pub struct App<'a, S: KeyValueStore + ?Sized, C: Clock> {
    store: &'a S,
    clock: C,
    navigator: Navigator,
    streak: StreakData,
    /// `current_streak` as last written; milestones are reported past it.
    observed: u32,
}

impl<'a, S: KeyValueStore + ?Sized, C: Clock> App<'a, S, C> {
    /// Start a session from whatever is persisted.
    ///
    /// An authenticated user with a missing or malformed record gets a fresh
    /// one. Before authentication the record lives in memory only.
    pub fn boot(store: &'a S, clock: C) -> Result<Self> {
        let now = clock.now();
        let seen = load_flag(store, keys::HAS_SEEN_ONBOARDING);
        let authenticated = load_flag(store, keys::IS_AUTHENTICATED);
        let streaks = StreakStore::new(store);

        let stored = streaks.load();
        let observed = stored.map_or(0, |data| data.current_streak);
        let streak = match stored {
            Some(data) => data.recompute(now),
            None if authenticated => streaks.initialize(now)?,
            None => StreakData::new(now),
        };
        let screen = initial_screen(seen, authenticated);
        tracing::debug!(%screen, current = streak.current_streak, "session booted");

        Ok(Self {
            store,
            clock,
            navigator: Navigator::new(screen),
            streak,
            observed,
        })
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn streak(&self) -> &StreakData {
        &self.streak
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub fn has_seen_onboarding(&self) -> bool {
        load_flag(self.store, keys::HAS_SEEN_ONBOARDING)
    }

    pub fn is_authenticated(&self) -> bool {
        load_flag(self.store, keys::IS_AUTHENTICATED)
    }

    /// Fails without side effects when `event` is not valid here.
    fn guard(&self, event: NavEvent) -> Result<(), ValidationError> {
        match transition(self.screen(), event) {
            Some(_) => Ok(()),
            None => Err(ValidationError::InvalidTransition {
                from: self.screen().to_string(),
                event: event.to_string(),
            }),
        }
    }

    pub fn complete_onboarding(&mut self) -> Result<Vec<Event>> {
        self.guard(NavEvent::CompleteOnboarding)?;
        let now = self.clock.now();
        save_json(self.store, keys::HAS_SEEN_ONBOARDING, &true)?;
        let moved = self.navigator.dispatch(NavEvent::CompleteOnboarding, now)?;
        Ok(vec![Event::OnboardingCompleted { at: now }, moved])
    }

    /// Sign in and start a fresh streak at the current instant.
    pub fn authenticate(&mut self, method: AuthMethod) -> Result<Vec<Event>> {
        self.guard(NavEvent::Authenticate)?;
        method.validate()?;
        let now = self.clock.now();
        save_json(self.store, keys::IS_AUTHENTICATED, &true)?;
        self.streak = StreakStore::new(self.store).initialize(now)?;
        self.observed = 0;
        let moved = self.navigator.dispatch(NavEvent::Authenticate, now)?;
        Ok(vec![
            Event::Authenticated {
                anonymous: method == AuthMethod::Anonymous,
                at: now,
            },
            Event::StreakInitialized {
                start_date: self.streak.start_date,
                at: now,
            },
            moved,
        ])
    }

    pub fn open(&mut self, destination: Destination) -> Result<Event> {
        let now = self.clock.now();
        Ok(self.navigator.dispatch(NavEvent::Open(destination), now)?)
    }

    pub fn back(&mut self) -> Result<Event> {
        let now = self.clock.now();
        Ok(self.navigator.dispatch(NavEvent::Back, now)?)
    }

    /// Check in: bring the streak up to date with the clock and report the
    /// milestones crossed since the last check-in.
    ///
    /// The record is written only when the day count moved, so each
    /// milestone is reported once across sessions.
    pub fn refresh(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        self.streak = self.streak.recompute(now);
        let current = self.streak.current_streak;
        if current == self.observed {
            return Ok(Vec::new());
        }

        let events: Vec<Event> = newly_reached(self.observed, current)
            .into_iter()
            .map(|m| Event::MilestoneReached {
                days: m.days,
                title: m.title.to_string(),
                at: now,
            })
            .collect();
        if self.is_authenticated() {
            StreakStore::new(self.store).persist(&self.streak)?;
        }
        self.observed = current;
        Ok(events)
    }

    /// Record a relapse from the settings screen and return to the dashboard.
    pub fn reset_streak(&mut self) -> Result<Vec<Event>> {
        self.guard(NavEvent::StreakReset)?;
        let now = self.clock.now();
        // Capture any growth since the last refresh before zeroing.
        let current = self.streak.recompute(now);
        self.streak = StreakStore::new(self.store).reset(&current, now)?;
        self.observed = 0;
        let moved = self.navigator.dispatch(NavEvent::StreakReset, now)?;
        Ok(vec![
            Event::StreakReset {
                previous_streak: current.current_streak,
                longest_streak: self.streak.longest_streak,
                at: now,
            },
            moved,
        ])
    }

    /// Clear every persisted key and return to onboarding.
    pub fn delete_all_data(&mut self) -> Result<Vec<Event>> {
        self.guard(NavEvent::DataDeleted)?;
        let now = self.clock.now();
        self.store.clear()?;
        self.streak = StreakData::new(now);
        self.observed = 0;
        tracing::info!("all data deleted");
        let moved = self.navigator.dispatch(NavEvent::DataDeleted, now)?;
        Ok(vec![Event::DataDeleted { at: now }, moved])
    }

    pub fn dashboard(&self, ui: &UiConfig) -> DashboardSummary {
        DashboardSummary::build(
            &self.streak,
            self.clock.now(),
            ui.hours_reclaimed_per_day,
            ui.goal_days,
        )
    }

    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary::build(&self.streak, self.clock.now())
    }

    pub fn milestones(&self) -> MilestoneReport {
        evaluate_milestones(self.streak.current_streak)
    }
}

fn load_flag<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> bool {
    load_json::<bool, _>(store, key).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
    }

    fn signed_in(store: &MemoryStore, clock: &FixedClock) {
        let mut app = App::boot(store, clock).unwrap();
        app.complete_onboarding().unwrap();
        app.authenticate(AuthMethod::Anonymous).unwrap();
    }

    #[test]
    fn fresh_boot_starts_on_onboarding_without_writing() {
        let store = MemoryStore::new();
        let app = App::boot(&store, clock()).unwrap();
        assert_eq!(app.screen(), Screen::Onboarding);
        assert_eq!(app.streak().current_streak, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn onboarding_then_auth_persists_flags_and_streak() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut app = App::boot(&store, &clock).unwrap();

        let events = app.complete_onboarding().unwrap();
        assert!(matches!(events[0], Event::OnboardingCompleted { .. }));
        assert_eq!(app.screen(), Screen::Auth);
        assert!(app.has_seen_onboarding());

        let events = app
            .authenticate(AuthMethod::Email {
                address: "me@example.com".into(),
            })
            .unwrap();
        assert!(matches!(events[0], Event::Authenticated { anonymous: false, .. }));
        assert_eq!(app.screen(), Screen::Dashboard);
        assert!(app.is_authenticated());
        assert_eq!(
            StreakStore::new(&store).load().unwrap().start_date,
            clock.now()
        );
    }

    #[test]
    fn bad_email_is_rejected_before_any_write() {
        let store = MemoryStore::new();
        let mut app = App::boot(&store, clock()).unwrap();
        app.complete_onboarding().unwrap();
        let err = app
            .authenticate(AuthMethod::Email {
                address: "nobody".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::InvalidValue { .. })));
        assert!(!app.is_authenticated());
        assert_eq!(app.screen(), Screen::Auth);
    }

    #[test]
    fn reboot_recomputes_from_clock() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);

        clock.advance(Duration::hours(24 * 5 + 23));
        let app = App::boot(&store, &clock).unwrap();
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.streak().current_streak, 5);
        assert_eq!(app.streak().longest_streak, 5);
    }

    #[test]
    fn authenticated_with_missing_record_reinitializes() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);
        store.set(keys::STREAK_DATA, "not json").unwrap();

        clock.advance(Duration::days(3));
        let app = App::boot(&store, &clock).unwrap();
        assert_eq!(app.streak().start_date, clock.now());
        assert!(StreakStore::new(&store).load().is_some());
    }

    #[test]
    fn refresh_reports_crossed_milestones() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);
        let mut app = App::boot(&store, &clock).unwrap();

        clock.advance(Duration::days(7));
        let events = app.refresh().unwrap();
        let days: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::MilestoneReached { days, .. } => Some(*days),
                _ => None,
            })
            .collect();
        assert_eq!(days, vec![1, 3, 7]);
        assert!(app.refresh().unwrap().is_empty());
    }

    #[test]
    fn milestones_are_reported_once_across_sessions() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);

        clock.advance(Duration::days(3));
        let mut app = App::boot(&store, &clock).unwrap();
        assert_eq!(app.refresh().unwrap().len(), 2);
        assert_eq!(StreakStore::new(&store).load().unwrap().current_streak, 3);

        let mut again = App::boot(&store, &clock).unwrap();
        assert!(again.refresh().unwrap().is_empty());

        clock.advance(Duration::days(4));
        let mut later = App::boot(&store, &clock).unwrap();
        let events = later.refresh().unwrap();
        assert!(matches!(events[..], [Event::MilestoneReached { days: 7, .. }]));
    }

    #[test]
    fn refresh_before_sign_in_writes_nothing() {
        let store = MemoryStore::new();
        let clock = clock();
        let mut app = App::boot(&store, &clock).unwrap();
        clock.advance(Duration::days(2));
        app.refresh().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn reset_requires_settings_screen() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);
        let mut app = App::boot(&store, &clock).unwrap();
        clock.advance(Duration::days(4));

        assert!(app.reset_streak().is_err());
        assert_eq!(app.streak().last_relapse_date, None);

        app.open(Destination::Settings).unwrap();
        let events = app.reset_streak().unwrap();
        assert!(matches!(
            events[0],
            Event::StreakReset { previous_streak: 4, longest_streak: 4, .. }
        ));
        assert_eq!(app.screen(), Screen::Dashboard);
        assert_eq!(app.streak().current_streak, 0);
        assert_eq!(StreakStore::new(&store).load(), Some(*app.streak()));
    }

    #[test]
    fn delete_all_data_returns_to_onboarding() {
        let store = MemoryStore::new();
        let clock = clock();
        signed_in(&store, &clock);
        let mut app = App::boot(&store, &clock).unwrap();
        app.open(Destination::Settings).unwrap();
        app.delete_all_data().unwrap();

        assert_eq!(app.screen(), Screen::Onboarding);
        assert!(store.is_empty());

        let rebooted = App::boot(&store, &clock).unwrap();
        assert_eq!(rebooted.screen(), Screen::Onboarding);
        assert_eq!(*rebooted.streak(), StreakData::new(clock.now()));
    }
}
