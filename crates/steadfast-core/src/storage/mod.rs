mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{ChatConfig, Config, SecurityConfig, UiConfig, UrgeConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StorageError};

/// Persisted key names. Values are JSON-encoded.
pub mod keys {
    pub const HAS_SEEN_ONBOARDING: &str = "hasSeenOnboarding";
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const STREAK_DATA: &str = "streakData";
    pub const THERAPIST_MESSAGES: &str = "therapistMessages";
    pub const SHIELD_ENABLED: &str = "shieldEnabled";
    pub const WEBSITE_BLOCKING_ENABLED: &str = "websiteBlockingEnabled";
    pub const APP_BLOCKING_ENABLED: &str = "appBlockingEnabled";
    pub const DNS_FILTERING_ENABLED: &str = "dnsFilteringEnabled";
    pub const BLOCKED_WEBSITES: &str = "blockedWebsites";
    pub const BLOCKED_APPS: &str = "blockedApps";
}

/// String key-value persistence service.
///
/// Mirrors the browser-style `get`/`set` contract the app state is written
/// against. Implementations are single-threaded.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Remove every key.
    fn clear(&self) -> Result<()>;
}

/// Read and decode a JSON value, failing soft.
///
/// A missing key, a read error and an unparsable value all yield `None`;
/// the latter two are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted value");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed persisted value");
            None
        }
    }
}

/// Encode a value as JSON and write it.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Returns the data directory.
///
/// `STEADFAST_DATA_DIR` wins when set; otherwise `~/.config/steadfast[-dev]/`
/// based on `STEADFAST_ENV`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STEADFAST_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STEADFAST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("steadfast-dev")
            } else {
                base_dir.join("steadfast")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<bool, _>(&store, keys::SHIELD_ENABLED), None);
    }

    #[test]
    fn load_json_discards_malformed_value() {
        let store = MemoryStore::new();
        store.set(keys::SHIELD_ENABLED, "not json").unwrap();
        assert_eq!(load_json::<bool, _>(&store, keys::SHIELD_ENABLED), None);
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        save_json(&store, keys::IS_AUTHENTICATED, &true).unwrap();
        assert_eq!(store.get(keys::IS_AUTHENTICATED).unwrap().as_deref(), Some("true"));
        assert_eq!(load_json::<bool, _>(&store, keys::IS_AUTHENTICATED), Some(true));
    }
}
