//! # Steadfast Core Library
//!
//! This library provides the core logic for Steadfast, a single-user streak
//! tracker for abstaining from a compulsive habit. It follows a CLI-first
//! layout: every operation is reachable through the `steadfast` binary, which
//! is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak**: the canonical [`StreakData`] record, derived from wall-clock
//!   time, plus milestone and progress projections of it
//! - **Storage**: a [`KeyValueStore`] trait backed by SQLite ([`Database`]) or
//!   memory ([`MemoryStore`]), and TOML-based configuration ([`Config`])
//! - **Navigator**: an explicit screen state machine
//! - **Chat / Shield / Urge**: self-contained feature state
//!
//! ## Key Components
//!
//! - [`App`]: session facade owning the navigator and live streak
//! - [`StreakStore`]: persistence boundary for the streak record
//! - [`Navigator`]: screen transitions
//! - [`Transcript`]: companion chat history

pub mod app;
pub mod chat;
pub mod clock;
pub mod content;
pub mod error;
pub mod events;
pub mod navigator;
pub mod onboarding;
pub mod shield;
pub mod storage;
pub mod streak;
pub mod urge;

pub use app::{App, AuthMethod};
pub use chat::{ChatCategory, Message, Sender, Transcript};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use navigator::{Destination, NavEvent, Navigator, Screen};
pub use shield::{BlockedItem, BlockedKind, ShieldPreferences, ShieldToggle};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use streak::{MilestoneReport, StreakData, StreakStore};
