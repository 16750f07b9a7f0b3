//! Persistence boundary for the streak record.
//!
//! Writes happen only at explicit mutation points (`initialize`, `reset`,
//! `persist`); recomputation never writes.

use chrono::{DateTime, Utc};

use super::data::StreakData;
use crate::error::Result;
use crate::storage::{keys, load_json, save_json, KeyValueStore};

pub struct StreakStore<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> StreakStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create and persist a zeroed record starting at `now`.
    pub fn initialize(&self, now: DateTime<Utc>) -> Result<StreakData> {
        let data = StreakData::new(now);
        self.persist(&data)?;
        tracing::info!(start = %now, "streak initialized");
        Ok(data)
    }

    /// Derive the up-to-date record. Pure; nothing is written.
    pub fn recompute(&self, data: &StreakData, now: DateTime<Utc>) -> StreakData {
        data.recompute(now)
    }

    /// Record a relapse at `now` and persist the result.
    pub fn reset(&self, data: &StreakData, now: DateTime<Utc>) -> Result<StreakData> {
        let reset = data.reset(now);
        self.persist(&reset)?;
        tracing::info!(
            previous = data.current_streak,
            longest = reset.longest_streak,
            "streak reset"
        );
        Ok(reset)
    }

    pub fn persist(&self, data: &StreakData) -> Result<()> {
        save_json(self.store, keys::STREAK_DATA, data)
    }

    /// Load the persisted record, failing soft.
    ///
    /// Returns `None` when nothing is stored, when the value does not parse,
    /// or when it breaks the relapse-after-start rule.
    pub fn load(&self) -> Option<StreakData> {
        let data: StreakData = load_json(self.store, keys::STREAK_DATA)?;
        if data
            .last_relapse_date
            .is_some_and(|relapse| relapse < data.start_date)
        {
            tracing::warn!("discarding streak record with relapse before start");
            return None;
        }
        Some(data)
    }

    pub fn delete(&self) -> Result<()> {
        self.store.remove(keys::STREAK_DATA)
    }
}
