//! Screen navigation as an explicit state machine.
//!
//! ## Transitions
//!
//! ```text
//! Onboarding -> Auth -> Dashboard <-> (feature screens)
//! Settings --StreakReset--> Dashboard
//! Settings --DataDeleted--> Onboarding
//! ```
//!
//! There is no history stack. `Back` from any feature screen returns to the
//! dashboard; every pair not in [`transition`] is rejected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Onboarding,
    Auth,
    Dashboard,
    #[serde(rename = "urge")]
    UrgeControl,
    Progress,
    Goals,
    Education,
    Settings,
    #[serde(rename = "shield")]
    ContentShield,
    #[serde(rename = "therapist")]
    AiTherapist,
}

impl Screen {
    pub const ALL: [Screen; 10] = [
        Screen::Onboarding,
        Screen::Auth,
        Screen::Dashboard,
        Screen::UrgeControl,
        Screen::Progress,
        Screen::Goals,
        Screen::Education,
        Screen::Settings,
        Screen::ContentShield,
        Screen::AiTherapist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Onboarding => "onboarding",
            Screen::Auth => "auth",
            Screen::Dashboard => "dashboard",
            Screen::UrgeControl => "urge",
            Screen::Progress => "progress",
            Screen::Goals => "goals",
            Screen::Education => "education",
            Screen::Settings => "settings",
            Screen::ContentShield => "shield",
            Screen::AiTherapist => "therapist",
        }
    }

    /// Screens reachable from the dashboard.
    pub fn is_feature(&self) -> bool {
        Destination::from_screen(*self).is_some()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature screen the dashboard can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    #[serde(rename = "urge")]
    UrgeControl,
    Progress,
    Goals,
    Education,
    Settings,
    #[serde(rename = "shield")]
    ContentShield,
    #[serde(rename = "therapist")]
    AiTherapist,
}

impl Destination {
    pub const ALL: [Destination; 7] = [
        Destination::UrgeControl,
        Destination::Progress,
        Destination::Goals,
        Destination::Education,
        Destination::Settings,
        Destination::ContentShield,
        Destination::AiTherapist,
    ];

    pub fn screen(self) -> Screen {
        match self {
            Destination::UrgeControl => Screen::UrgeControl,
            Destination::Progress => Screen::Progress,
            Destination::Goals => Screen::Goals,
            Destination::Education => Screen::Education,
            Destination::Settings => Screen::Settings,
            Destination::ContentShield => Screen::ContentShield,
            Destination::AiTherapist => Screen::AiTherapist,
        }
    }

    pub fn from_screen(screen: Screen) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.screen() == screen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "to", rename_all = "snake_case")]
pub enum NavEvent {
    CompleteOnboarding,
    Authenticate,
    Open(Destination),
    Back,
    StreakReset,
    DataDeleted,
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavEvent::CompleteOnboarding => f.write_str("complete_onboarding"),
            NavEvent::Authenticate => f.write_str("authenticate"),
            NavEvent::Open(dest) => write!(f, "open({})", dest.screen()),
            NavEvent::Back => f.write_str("back"),
            NavEvent::StreakReset => f.write_str("streak_reset"),
            NavEvent::DataDeleted => f.write_str("data_deleted"),
        }
    }
}

/// The transition table. `None` means the event is not valid on `from`.
pub fn transition(from: Screen, event: NavEvent) -> Option<Screen> {
    match (from, event) {
        (Screen::Onboarding, NavEvent::CompleteOnboarding) => Some(Screen::Auth),
        (Screen::Auth, NavEvent::Authenticate) => Some(Screen::Dashboard),
        (Screen::Dashboard, NavEvent::Open(dest)) => Some(dest.screen()),
        (screen, NavEvent::Back) if screen.is_feature() => Some(Screen::Dashboard),
        (Screen::Settings, NavEvent::StreakReset) => Some(Screen::Dashboard),
        (Screen::Settings, NavEvent::DataDeleted) => Some(Screen::Onboarding),
        _ => None,
    }
}

/// Where a session starts given the persisted flags.
pub fn initial_screen(has_seen_onboarding: bool, is_authenticated: bool) -> Screen {
    match (has_seen_onboarding, is_authenticated) {
        (true, true) => Screen::Dashboard,
        (true, false) => Screen::Auth,
        _ => Screen::Onboarding,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    pub fn new(start: Screen) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply `event`. On rejection the current screen is unchanged.
    pub fn dispatch(
        &mut self,
        event: NavEvent,
        at: DateTime<Utc>,
    ) -> Result<Event, ValidationError> {
        let from = self.current;
        let to = transition(from, event).ok_or_else(|| ValidationError::InvalidTransition {
            from: from.to_string(),
            event: event.to_string(),
        })?;
        self.current = to;
        tracing::debug!(%from, %to, trigger = %event, "screen changed");
        Ok(Event::ScreenChanged { from, to, at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn all_events() -> Vec<NavEvent> {
        let mut events = vec![
            NavEvent::CompleteOnboarding,
            NavEvent::Authenticate,
            NavEvent::Back,
            NavEvent::StreakReset,
            NavEvent::DataDeleted,
        ];
        events.extend(Destination::ALL.map(NavEvent::Open));
        events
    }

    #[test]
    fn happy_path() {
        let mut nav = Navigator::new(Screen::Onboarding);
        nav.dispatch(NavEvent::CompleteOnboarding, at()).unwrap();
        assert_eq!(nav.current(), Screen::Auth);
        nav.dispatch(NavEvent::Authenticate, at()).unwrap();
        assert_eq!(nav.current(), Screen::Dashboard);
        nav.dispatch(NavEvent::Open(Destination::Settings), at()).unwrap();
        assert_eq!(nav.current(), Screen::Settings);
        nav.dispatch(NavEvent::DataDeleted, at()).unwrap();
        assert_eq!(nav.current(), Screen::Onboarding);
    }

    #[test]
    fn every_destination_opens_and_returns() {
        for dest in Destination::ALL {
            let mut nav = Navigator::new(Screen::Dashboard);
            nav.dispatch(NavEvent::Open(dest), at()).unwrap();
            assert_eq!(nav.current(), dest.screen());
            nav.dispatch(NavEvent::Back, at()).unwrap();
            assert_eq!(nav.current(), Screen::Dashboard);
        }
    }

    #[test]
    fn table_is_exhaustive() {
        let mut accepted = 0;
        for from in Screen::ALL {
            for event in all_events() {
                let Some(to) = transition(from, event) else {
                    continue;
                };
                accepted += 1;
                match event {
                    NavEvent::CompleteOnboarding => {
                        assert_eq!((from, to), (Screen::Onboarding, Screen::Auth))
                    }
                    NavEvent::Authenticate => {
                        assert_eq!((from, to), (Screen::Auth, Screen::Dashboard))
                    }
                    NavEvent::Open(dest) => {
                        assert_eq!((from, to), (Screen::Dashboard, dest.screen()))
                    }
                    NavEvent::Back => {
                        assert!(from.is_feature());
                        assert_eq!(to, Screen::Dashboard);
                    }
                    NavEvent::StreakReset => {
                        assert_eq!((from, to), (Screen::Settings, Screen::Dashboard))
                    }
                    NavEvent::DataDeleted => {
                        assert_eq!((from, to), (Screen::Settings, Screen::Onboarding))
                    }
                }
            }
        }
        // 1 + 1 + 7 opens + 7 backs + 2 settings actions
        assert_eq!(accepted, 18);
    }

    #[test]
    fn rejected_event_leaves_state() {
        let mut nav = Navigator::new(Screen::Goals);
        let err = nav.dispatch(NavEvent::Authenticate, at()).unwrap_err();
        assert_eq!(nav.current(), Screen::Goals);
        assert!(matches!(
            err,
            ValidationError::InvalidTransition { ref from, ref event }
                if from == "goals" && event == "authenticate"
        ));
    }

    #[test]
    fn no_back_from_entry_screens() {
        for screen in [Screen::Onboarding, Screen::Auth, Screen::Dashboard] {
            assert_eq!(transition(screen, NavEvent::Back), None);
        }
    }

    #[test]
    fn initial_screen_from_flags() {
        assert_eq!(initial_screen(true, true), Screen::Dashboard);
        assert_eq!(initial_screen(true, false), Screen::Auth);
        assert_eq!(initial_screen(false, false), Screen::Onboarding);
        assert_eq!(initial_screen(false, true), Screen::Onboarding);
    }

    #[test]
    fn screen_names_match_serde() {
        for screen in Screen::ALL {
            let json = serde_json::to_value(screen).unwrap();
            assert_eq!(json, screen.as_str());
        }
    }
}
