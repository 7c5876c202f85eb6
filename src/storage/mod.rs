use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::catalog::CustomCategory;
use crate::game::settings::{Player, RoundSettings};

pub const KEY_PLAYERS: &str = "imposter-players";
pub const KEY_IMPOSTER_COUNT: &str = "imposter-count";
pub const KEY_SELECTED_CATEGORIES: &str = "imposter-selected-categories";
pub const KEY_CUSTOM_CATEGORIES: &str = "imposter-custom-categories";

/// Flat string key-value storage with one logical writer. Reads happen once
/// at startup; writes are synchronous and best-effort.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Ephemeral store for tests and `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One JSON object on disk, rewritten on every set. A corrupt or missing
/// file degrades to an empty store; write failures are reported on stderr
/// and never propagate.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let serialized = match serde_json::to_string_pretty(&self.entries) {
            Ok(s) => s,
            Err(err) => {
                eprintln!("imposter: failed to serialize settings: {err}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(err) = fs::write(&self.path, serialized) {
            eprintln!("imposter: failed to save {}: {err}", self.path.display());
        }
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

/// Loads and saves the durable game configuration over any [`KvStore`].
///
/// Loading never fails: each entry falls back to its default when missing or
/// malformed, so the worst case after corruption is a freshly configured
/// game.
pub struct SettingsRepo<S: KvStore> {
    store: S,
}

impl<S: KvStore> SettingsRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load_settings(&self) -> RoundSettings {
        let defaults = RoundSettings::default();

        let players: Vec<Player> = self
            .parse_json(KEY_PLAYERS)
            .filter(|roster: &Vec<Player>| !roster.is_empty())
            .unwrap_or(defaults.players);

        let selected: BTreeSet<String> = self
            .parse_json::<Vec<String>>(KEY_SELECTED_CATEGORIES)
            .map(|names| names.into_iter().collect())
            .unwrap_or(defaults.selected_category_names);

        let mut settings = RoundSettings {
            players,
            imposter_count: defaults.imposter_count,
            selected_category_names: selected,
        };

        // Stored as a decimal string; the setter re-clamps against whatever
        // roster actually loaded.
        let count = self
            .store
            .get(KEY_IMPOSTER_COUNT)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(1);
        settings.set_imposter_count(count);
        settings
    }

    pub fn load_custom_categories(&self) -> Vec<CustomCategory> {
        self.parse_json(KEY_CUSTOM_CATEGORIES).unwrap_or_default()
    }

    pub fn save_settings(&mut self, settings: &RoundSettings) {
        self.set_json(KEY_PLAYERS, &settings.players);
        self.store
            .set(KEY_IMPOSTER_COUNT, settings.imposter_count.to_string());
        let selected: Vec<&String> = settings.selected_category_names.iter().collect();
        self.set_json(KEY_SELECTED_CATEGORIES, &selected);
    }

    pub fn save_custom_categories(&mut self, categories: &[CustomCategory]) {
        self.set_json(KEY_CUSTOM_CATEGORIES, &categories);
    }

    fn parse_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store
            .get(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    fn set_json<T: serde::Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(serialized) => self.store.set(key, serialized),
            Err(err) => eprintln!("imposter: failed to serialize {key}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let mut repo = SettingsRepo::new(MemoryStore::default());
        let mut settings = RoundSettings::default();
        settings.players.push(Player::new(5, "Eve"));
        settings.set_imposter_count(2);
        settings.selected_category_names = ["Animals".to_string(), "Food".to_string()]
            .into_iter()
            .collect();

        repo.save_settings(&settings);
        assert_eq!(repo.load_settings(), settings);
    }

    #[test]
    fn missing_entries_fall_back_to_defaults() {
        let repo = SettingsRepo::new(MemoryStore::default());
        assert_eq!(repo.load_settings(), RoundSettings::default());
        assert!(repo.load_custom_categories().is_empty());
    }

    #[test]
    fn corrupt_entries_fall_back_per_key() {
        let mut store = MemoryStore::default();
        store.set(KEY_PLAYERS, "{not json".to_string());
        store.set(KEY_IMPOSTER_COUNT, "two".to_string());
        store.set(KEY_SELECTED_CATEGORIES, "[1, 2, 3]".to_string());
        store.set(KEY_CUSTOM_CATEGORIES, "null".to_string());

        let repo = SettingsRepo::new(store);
        assert_eq!(repo.load_settings(), RoundSettings::default());
        assert!(repo.load_custom_categories().is_empty());
    }

    #[test]
    fn stored_imposter_count_is_clamped_against_loaded_roster() {
        let mut store = MemoryStore::default();
        store.set(
            KEY_PLAYERS,
            serde_json::to_string(&vec![Player::new(1, "Ana"), Player::new(2, "Bo")]).unwrap(),
        );
        store.set(KEY_IMPOSTER_COUNT, "7".to_string());

        let settings = SettingsRepo::new(store).load_settings();
        assert_eq!(settings.players.len(), 2);
        assert_eq!(settings.imposter_count, 1);
    }

    #[test]
    fn custom_categories_round_trip() {
        let mut repo = SettingsRepo::new(MemoryStore::default());
        let customs = vec![CustomCategory {
            id: "custom-1".to_string(),
            name: "Mine".to_string(),
            icon: Some("Star".to_string()),
            words: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }];
        repo.save_custom_categories(&customs);
        assert_eq!(repo.load_custom_categories(), customs);
    }

    #[test]
    fn file_store_survives_reopen_and_corruption() {
        let path = std::env::temp_dir().join(format!("imposter-test-{}.json", uuid::Uuid::new_v4()));

        {
            let mut store = JsonFileStore::open(&path);
            store.set("k", "v".to_string());
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("k"), Some("v".to_string()));

        std::fs::write(&path, "###").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("k"), None);

        let _ = std::fs::remove_file(&path);
    }
}
