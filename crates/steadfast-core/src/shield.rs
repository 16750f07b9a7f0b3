//! Content shield preferences.
//!
//! This is a preference record only: the user's stated block list and
//! toggles are stored, nothing on the device is filtered. Each field is
//! persisted under its own key and loads independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::storage::{keys, load_json, save_json, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockedKind {
    Website,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedItem {
    pub id: String,
    /// Website address or app name as the user typed it.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: BlockedKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldToggle {
    Shield,
    WebsiteBlocking,
    AppBlocking,
    DnsFiltering,
}

impl ShieldToggle {
    pub const ALL: [ShieldToggle; 4] = [
        ShieldToggle::Shield,
        ShieldToggle::WebsiteBlocking,
        ShieldToggle::AppBlocking,
        ShieldToggle::DnsFiltering,
    ];

    fn key(&self) -> &'static str {
        match self {
            ShieldToggle::Shield => keys::SHIELD_ENABLED,
            ShieldToggle::WebsiteBlocking => keys::WEBSITE_BLOCKING_ENABLED,
            ShieldToggle::AppBlocking => keys::APP_BLOCKING_ENABLED,
            ShieldToggle::DnsFiltering => keys::DNS_FILTERING_ENABLED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldPreferences {
    pub shield_enabled: bool,
    pub website_blocking_enabled: bool,
    pub app_blocking_enabled: bool,
    pub dns_filtering_enabled: bool,
    pub blocked_websites: Vec<BlockedItem>,
    pub blocked_apps: Vec<BlockedItem>,
}

impl ShieldPreferences {
    /// Load each key on its own; anything missing or malformed stays default.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let flag = |toggle: ShieldToggle| load_json::<bool, _>(store, toggle.key()).unwrap_or(false);
        Self {
            shield_enabled: flag(ShieldToggle::Shield),
            website_blocking_enabled: flag(ShieldToggle::WebsiteBlocking),
            app_blocking_enabled: flag(ShieldToggle::AppBlocking),
            dns_filtering_enabled: flag(ShieldToggle::DnsFiltering),
            blocked_websites: load_json(store, keys::BLOCKED_WEBSITES).unwrap_or_default(),
            blocked_apps: load_json(store, keys::BLOCKED_APPS).unwrap_or_default(),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        for toggle in ShieldToggle::ALL {
            save_json(store, toggle.key(), &self.is_enabled(toggle))?;
        }
        save_json(store, keys::BLOCKED_WEBSITES, &self.blocked_websites)?;
        save_json(store, keys::BLOCKED_APPS, &self.blocked_apps)?;
        Ok(())
    }

    pub fn is_enabled(&self, toggle: ShieldToggle) -> bool {
        match toggle {
            ShieldToggle::Shield => self.shield_enabled,
            ShieldToggle::WebsiteBlocking => self.website_blocking_enabled,
            ShieldToggle::AppBlocking => self.app_blocking_enabled,
            ShieldToggle::DnsFiltering => self.dns_filtering_enabled,
        }
    }

    pub fn set(&mut self, toggle: ShieldToggle, enabled: bool) {
        let slot = match toggle {
            ShieldToggle::Shield => &mut self.shield_enabled,
            ShieldToggle::WebsiteBlocking => &mut self.website_blocking_enabled,
            ShieldToggle::AppBlocking => &mut self.app_blocking_enabled,
            ShieldToggle::DnsFiltering => &mut self.dns_filtering_enabled,
        };
        *slot = enabled;
    }

    pub fn items(&self, kind: BlockedKind) -> &[BlockedItem] {
        match kind {
            BlockedKind::Website => &self.blocked_websites,
            BlockedKind::App => &self.blocked_apps,
        }
    }

    fn items_mut(&mut self, kind: BlockedKind) -> &mut Vec<BlockedItem> {
        match kind {
            BlockedKind::Website => &mut self.blocked_websites,
            BlockedKind::App => &mut self.blocked_apps,
        }
    }

    /// Add an entry. Blank names are ignored.
    pub fn add(&mut self, kind: BlockedKind, name: &str) -> Option<&BlockedItem> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let items = self.items_mut(kind);
        items.push(BlockedItem {
            id: Uuid::new_v4().to_string(),
            url: name.to_string(),
            kind,
        });
        items.last()
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    pub fn remove(&mut self, kind: BlockedKind, id: &str) -> bool {
        let items = self.items_mut(kind);
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    /// Remove by id from whichever list holds it.
    pub fn remove_any(&mut self, id: &str) -> Option<BlockedKind> {
        [BlockedKind::Website, BlockedKind::App]
            .into_iter()
            .find(|kind| self.remove(*kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_are_off_and_empty() {
        let prefs = ShieldPreferences::load(&MemoryStore::new());
        assert_eq!(prefs, ShieldPreferences::default());
        assert!(ShieldToggle::ALL.iter().all(|t| !prefs.is_enabled(*t)));
    }

    #[test]
    fn add_trims_and_ignores_blank() {
        let mut prefs = ShieldPreferences::default();
        assert!(prefs.add(BlockedKind::Website, "   ").is_none());
        let item = prefs.add(BlockedKind::Website, "  example.com ").unwrap();
        assert_eq!(item.url, "example.com");
        assert_eq!(item.kind, BlockedKind::Website);
        assert_eq!(prefs.items(BlockedKind::Website).len(), 1);
        assert!(prefs.items(BlockedKind::App).is_empty());
    }

    #[test]
    fn remove_by_id() {
        let mut prefs = ShieldPreferences::default();
        let id = prefs.add(BlockedKind::App, "Social").unwrap().id.clone();
        prefs.add(BlockedKind::App, "Video").unwrap();

        assert!(!prefs.remove(BlockedKind::Website, &id));
        assert!(prefs.remove(BlockedKind::App, &id));
        assert!(!prefs.remove(BlockedKind::App, &id));
        assert_eq!(prefs.items(BlockedKind::App).len(), 1);
        assert_eq!(prefs.items(BlockedKind::App)[0].url, "Video");
    }

    #[test]
    fn remove_any_finds_the_list() {
        let mut prefs = ShieldPreferences::default();
        let id = prefs.add(BlockedKind::App, "Social").unwrap().id.clone();
        assert_eq!(prefs.remove_any(&id), Some(BlockedKind::App));
        assert_eq!(prefs.remove_any(&id), None);
    }

    #[test]
    fn save_writes_one_key_per_field() {
        let store = MemoryStore::new();
        let mut prefs = ShieldPreferences::default();
        prefs.set(ShieldToggle::Shield, true);
        prefs.set(ShieldToggle::DnsFiltering, true);
        prefs.add(BlockedKind::Website, "example.com");
        prefs.save(&store).unwrap();

        assert_eq!(store.get(keys::SHIELD_ENABLED).unwrap().as_deref(), Some("true"));
        assert_eq!(store.get(keys::APP_BLOCKING_ENABLED).unwrap().as_deref(), Some("false"));
        let raw = store.get(keys::BLOCKED_WEBSITES).unwrap().unwrap();
        assert!(raw.contains("\"type\":\"website\""));

        assert_eq!(ShieldPreferences::load(&store), prefs);
    }

    #[test]
    fn one_bad_key_does_not_spoil_the_rest() {
        let store = MemoryStore::new();
        store.set(keys::SHIELD_ENABLED, "true").unwrap();
        store.set(keys::BLOCKED_APPS, "{broken").unwrap();
        let prefs = ShieldPreferences::load(&store);
        assert!(prefs.shield_enabled);
        assert!(prefs.blocked_apps.is_empty());
    }
}
