//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Chat typing delay and optional response seed
//! - Urge tool timings (countdown length, breathing phase length)
//! - Dashboard display settings
//! - App lock and PIN
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result, ValidationError};

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_typing_delay_min_ms")]
    pub typing_delay_min_ms: u64,
    #[serde(default = "default_typing_delay_jitter_ms")]
    pub typing_delay_jitter_ms: u64,
    /// Fixed seed for response selection (unset = random).
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Urge control tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgeConfig {
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
    #[serde(default = "default_breath_phase_secs")]
    pub breath_phase_secs: u32,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    /// Hours credited back per clean day on the dashboard.
    #[serde(default = "default_hours_reclaimed_per_day")]
    pub hours_reclaimed_per_day: u32,
    /// Day count the dashboard progress bar fills towards.
    #[serde(default = "default_goal_days")]
    pub goal_days: u32,
}

/// App lock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    #[serde(default)]
    pub app_lock_enabled: bool,
    /// Empty when no PIN has been configured.
    #[serde(default)]
    pub pin: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub urge: UrgeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

fn default_typing_delay_min_ms() -> u64 {
    1000
}
fn default_typing_delay_jitter_ms() -> u64 {
    1000
}
fn default_countdown_secs() -> u32 {
    60
}
fn default_breath_phase_secs() -> u32 {
    4
}
fn default_true() -> bool {
    true
}
fn default_hours_reclaimed_per_day() -> u32 {
    2
}
fn default_goal_days() -> u32 {
    90
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_min_ms: default_typing_delay_min_ms(),
            typing_delay_jitter_ms: default_typing_delay_jitter_ms(),
            seed: None,
        }
    }
}

impl Default for UrgeConfig {
    fn default() -> Self {
        Self {
            countdown_secs: default_countdown_secs(),
            breath_phase_secs: default_breath_phase_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            hours_reclaimed_per_day: default_hours_reclaimed_per_day(),
            goal_days: default_goal_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // "none" clears any non-string leaf; non-optional fields
                // reject the null when the JSON view is deserialized.
                let clears = value.eq_ignore_ascii_case("none")
                    && !matches!(existing, serde_json::Value::String(_));

                let new_value = match existing {
                    _ if clears => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    // Unset optional: accept a JSON literal.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("only leaf keys can be set".to_string()));
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return (and write) the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without persisting.
    ///
    /// The updated config is validated before it replaces `self`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check cross-field rules.
    ///
    /// The PIN, when set, is 4-6 ASCII digits, and the app lock can only be
    /// enabled once a PIN exists.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let pin = &self.security.pin;
        if !pin.is_empty() && !is_valid_pin(pin) {
            return Err(ValidationError::InvalidValue {
                field: "security.pin".into(),
                message: "PIN must be 4 to 6 digits".into(),
            });
        }
        if self.security.app_lock_enabled && pin.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "security.app_lock_enabled".into(),
                message: "set a PIN before enabling the app lock".into(),
            });
        }
        if self.urge.breath_phase_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "urge.breath_phase_secs".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.ui.goal_days == 0 {
            return Err(ValidationError::InvalidValue {
                field: "ui.goal_days".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn is_valid_pin(pin: &str) -> bool {
    (4..=6).contains(&pin.len()) && pin.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.ui.dark_mode);
        assert_eq!(parsed.urge.countdown_secs, 60);
        assert_eq!(parsed.chat.seed, None);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[urge]\ncountdown_secs = 90\n").unwrap();
        assert_eq!(parsed.urge.countdown_secs, 90);
        assert_eq!(parsed.urge.breath_phase_secs, 4);
        assert_eq!(parsed.chat.typing_delay_min_ms, 1000);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("true"));
        assert_eq!(cfg.get("urge.countdown_secs").as_deref(), Some("60"));
        assert_eq!(cfg.get("security.pin").as_deref(), Some(""));
        assert!(cfg.get("ui.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("ui.dark_mode", "false").unwrap();
        cfg.apply("chat.typing_delay_min_ms", "250").unwrap();
        cfg.apply("chat.seed", "42").unwrap();
        assert!(!cfg.ui.dark_mode);
        assert_eq!(cfg.chat.typing_delay_min_ms, 250);
        assert_eq!(cfg.chat.seed, Some(42));

        cfg.apply("chat.seed", "none").unwrap();
        assert_eq!(cfg.chat.seed, None);
    }

    #[test]
    fn none_is_rejected_for_required_fields() {
        let mut cfg = Config::default();
        assert!(cfg.apply("urge.countdown_secs", "none").is_err());
        assert!(cfg.apply("ui.dark_mode", "None").is_err());
        assert_eq!(cfg.urge.countdown_secs, 60);

        assert!(cfg.apply("security.pin", "none").is_err());
        assert_eq!(cfg.security.pin, "");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("ui.nonexistent_key", "value").unwrap_err();
        assert!(matches!(err, crate::CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("ui.dark_mode", "not_a_bool").is_err());
        assert!(cfg.ui.dark_mode);
    }

    #[test]
    fn app_lock_requires_pin() {
        let mut cfg = Config::default();
        let err = cfg.apply("security.app_lock_enabled", "true").unwrap_err();
        assert!(matches!(err, crate::CoreError::Validation(_)));
        assert!(!cfg.security.app_lock_enabled);

        cfg.apply("security.pin", "2468").unwrap();
        cfg.apply("security.app_lock_enabled", "true").unwrap();
        assert!(cfg.security.app_lock_enabled);
    }

    #[test]
    fn pin_must_be_digits() {
        let mut cfg = Config::default();
        assert!(cfg.apply("security.pin", "12ab").is_err());
        assert!(cfg.apply("security.pin", "123").is_err());
        assert!(cfg.apply("security.pin", "1234567").is_err());
        assert!(cfg.security.pin.is_empty());
    }

    #[test]
    fn load_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.ui.goal_days, 90);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\ndark_mode = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
