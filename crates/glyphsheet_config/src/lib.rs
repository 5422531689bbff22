pub mod errors;
pub mod settings;
pub mod storage;

use crate::errors::Error;
use crate::settings::{Setting, SettingInfo};
use crate::storage::MemoryStorageAdapter;
use glyphsheet_shared::types::Result;
use lazy_static::lazy_static;
use log::warn;
use serde_derive::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::mem;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wildmatch::WildMatch;

pub const LOG_TARGET: &str = "config";

/// Settings are declared in a json file, which is included in the binary.
const SETTINGS_JSON: &str = include_str!("./settings.json");

/// `StorageAdapter` is the interface for storing and retrieving settings.
/// Adapters are shared between threads, so they need to be `Send + Sync`.
pub trait StorageAdapter: Send + Sync {
    /// Retrieves a setting from the storage
    fn get(&self, key: &str) -> Option<Setting>;

    /// Stores a given setting to the storage. Adapters use interior mutability, so this works on
    /// a shared reference.
    fn set(&self, key: &str, value: Setting);

    /// Retrieves all the settings in the storage in one go. This is used for preloading the
    /// settings into the `ConfigStore`.
    fn all(&self) -> Result<HashMap<String, Setting>>;
}

lazy_static! {
    // Initial config store will have a memory storage adapter. It will save within the session, but not
    // persist this on disk.
    static ref CONFIG_STORE: RwLock<ConfigStore> = RwLock::new(ConfigStore::default());
}

/// Returns a read guard on the global config store.
/// Callers can just do `config_store().get("loader.cache.enabled")`
pub fn config_store() -> RwLockReadGuard<'static, ConfigStore> {
    CONFIG_STORE.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn config_store_write() -> RwLockWriteGuard<'static, ConfigStore> {
    CONFIG_STORE.write().unwrap_or_else(PoisonError::into_inner)
}

/// These macro's can be used to simplify the calls to the config store. You can simply do:
///
/// let enabled = config!(bool "loader.cache.enabled");
/// config_set!(bool "loader.cache.enabled", false);
///
/// Note that when you cannot find the key, it will return a default value. You can test for
/// existence of the key with `config_store().has("key")`
#[macro_export]
macro_rules! config {
    (string $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.as_string(),
            None => String::new(),
        }
    };
    (bool $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_bool(),
            None => false,
        }
    };
    (uint $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_uint(),
            None => 0,
        }
    };
    (sint $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_sint(),
            None => 0,
        }
    };
    (map $key:expr) => {
        match $crate::config_store().get($key) {
            Some(setting) => setting.to_map(),
            None => Vec::new(),
        }
    };
}

#[macro_export]
macro_rules! config_set {
    (string $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::String($val))
    };
    (bool $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::Bool($val))
    };
    (uint $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::UInt($val))
    };
    (sint $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::SInt($val))
    };
    (map $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::Map($val))
    };
}

/// `JsonEntry` is used for parsing the settings.json file
#[derive(Debug, Deserialize)]
struct JsonEntry {
    key: String,
    #[serde(rename = "type")]
    _entry_type: String,
    default: String,
    description: String,
}

/// Configuration storage is the place where glyphsheet finds all configurable options
pub struct ConfigStore {
    /// All current settings
    settings: Mutex<HashMap<String, Setting>>,
    /// Descriptions, default values and type information of all known settings
    settings_info: HashMap<String, SettingInfo>,
    /// Keys of all settings in declaration order
    setting_keys: Vec<String>,
    /// The storage adapter used for persisting and loading keys
    storage: Box<dyn StorageAdapter>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        let mut store = Self {
            settings: Mutex::new(HashMap::new()),
            settings_info: HashMap::new(),
            setting_keys: Vec::new(),
            storage: Box::new(MemoryStorageAdapter::new()),
        };

        if let Err(err) = store.populate_default_settings() {
            warn!(target: LOG_TARGET, "config: cannot load default settings: {err}");
        }
        store
    }
}

impl ConfigStore {
    fn settings(&self) -> std::sync::MutexGuard<'_, HashMap<String, Setting>> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets a new storage engine and updates all settings in the config store according to what
    /// is written in the storage. Settings found in the storage overwrite the current ones.
    pub fn set_storage(&mut self, storage: Box<dyn StorageAdapter>) {
        self.storage = storage;

        match self.storage.all() {
            Ok(all_settings) => {
                for (key, value) in all_settings {
                    if self.accepts(&key, &value) {
                        self.settings().insert(key, value);
                    }
                }
            }
            Err(err) => warn!(target: LOG_TARGET, "config: cannot read settings from storage: {err}"),
        }
    }

    /// Only declared settings with a value of the declared type are accepted
    fn accepts(&self, key: &str, value: &Setting) -> bool {
        let Some(info) = self.settings_info.get(key) else {
            warn!(target: LOG_TARGET, "config: Setting {key} is not known");
            return false;
        };

        if mem::discriminant(&info.default) != mem::discriminant(value) {
            warn!(target: LOG_TARGET, "config: Setting {key} is of different type than setting expects");
            return false;
        }

        true
    }

    /// Returns true when the store knows about the given key
    pub fn has(&self, key: &str) -> bool {
        self.settings().contains_key(key)
    }

    /// Returns a list of keys that matches the given search string (can use ? and *) for search
    /// wildcards.
    pub fn find(&self, search: &str) -> Vec<String> {
        let search = WildMatch::new(search);

        self.setting_keys.iter().filter(|key| search.matches(key)).cloned().collect()
    }

    /// Retrieves information about the given key, or returns None when key is unknown
    pub fn get_info(&self, key: &str) -> Option<SettingInfo> {
        self.settings_info.get(key).cloned()
    }

    /// Returns the setting with the given key. When the key is not loaded yet, it is looked up
    /// in the storage, and after that the declared default is used. Unknown keys return None.
    pub fn get(&self, key: &str) -> Option<Setting> {
        if let Some(setting) = self.settings().get(key) {
            return Some(setting.clone());
        }

        let Some(info) = self.settings_info.get(key) else {
            warn!(target: LOG_TARGET, "config: Setting {key} is not known");
            return None;
        };

        match self.storage.get(key) {
            Some(setting) if self.accepts(key, &setting) => {
                self.settings().insert(key.to_string(), setting.clone());
                Some(setting)
            }
            _ => Some(info.default.clone()),
        }
    }

    /// Sets the given setting to the given value and persists it to the storage. The setting
    /// MUST be declared in settings.json and be of the declared type, otherwise it is refused.
    pub fn set(&self, key: &str, value: Setting) {
        if !self.accepts(key, &value) {
            return;
        }

        self.settings().insert(key.to_owned(), value.clone());
        self.storage.set(key, value);
    }

    /// Populates the settings in the storage from the settings.json file
    fn populate_default_settings(&mut self) -> Result<()> {
        let json_data: Value = serde_json::from_str(SETTINGS_JSON).map_err(Error::from)?;

        let Value::Object(data) = json_data else {
            return Err(Error::Config("settings.json is not an object".into()).into());
        };

        for (section_prefix, section_entries) in &data {
            let section_entries: Vec<JsonEntry> = serde_json::from_value(section_entries.clone()).map_err(Error::from)?;

            for entry in section_entries {
                let key = format!("{}.{}", section_prefix, entry.key);

                let info = SettingInfo {
                    key: key.clone(),
                    description: entry.description,
                    default: Setting::from_str(&entry.default)?,
                };

                self.setting_keys.push(key.clone());
                self.settings().insert(key.clone(), info.default.clone());
                self.settings_info.insert(key, info);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_declared() {
        let store = ConfigStore::default();
        assert_eq!(store.get("loader.cache.enabled"), Some(Setting::Bool(true)));
        assert_eq!(store.get("loader.cache.max_entries"), Some(Setting::UInt(16)));
        assert_eq!(store.get("inspect.show_empty"), Some(Setting::Bool(false)));
        assert!(store.has("inspect.sample_text"));
        assert!(store.get_info("inspect.sample_text").is_some());
    }

    #[test]
    fn set_and_get() {
        let store = ConfigStore::default();
        store.set("loader.cache.max_entries", Setting::UInt(3));
        assert_eq!(store.get("loader.cache.max_entries"), Some(Setting::UInt(3)));
    }

    #[test]
    fn unknown_key_is_none() {
        let store = ConfigStore::default();
        assert_eq!(store.get("this.key.doesnt.exist"), None);
        assert!(!store.has("this.key.doesnt.exist"));
    }

    #[test]
    fn find_with_wildcards() {
        let store = ConfigStore::default();
        let keys = store.find("loader.cache.*");
        assert_eq!(keys, vec!["loader.cache.enabled".to_string(), "loader.cache.max_entries".to_string()]);
        assert!(store.find("nothing.*").is_empty());
    }

    #[test]
    fn storage_overrides_defaults() {
        let storage: MemoryStorageAdapter = [("inspect.show_empty", Setting::Bool(true))].into_iter().collect();

        let mut store = ConfigStore::default();
        store.set_storage(Box::new(storage));
        assert_eq!(store.get("inspect.show_empty"), Some(Setting::Bool(true)));
    }

    #[test]
    fn storage_cannot_bypass_declarations() {
        testing_logger::setup();

        let storage: MemoryStorageAdapter = [
            ("loader.cache.max_entries", Setting::String("lots".into())),
            ("not.declared", Setting::Bool(true)),
            ("inspect.show_empty", Setting::Bool(true)),
        ]
        .into_iter()
        .collect();

        let mut store = ConfigStore::default();
        store.set_storage(Box::new(storage));

        testing_logger::validate(|captured_logs| {
            let warnings = captured_logs.iter().filter(|log| log.level == log::Level::Warn).count();
            assert_eq!(warnings, 2);
        });
        assert_eq!(store.get("loader.cache.max_entries"), Some(Setting::UInt(16)));
        assert_eq!(store.get("inspect.show_empty"), Some(Setting::Bool(true)));
        assert!(!store.has("not.declared"));
        assert_eq!(store.get("not.declared"), None);
    }

    #[test]
    fn invalid_setting() {
        testing_logger::setup();

        let store = ConfigStore::default();
        store.set("loader.cache.enabled", Setting::String("wont accept strings".into()));
        store.set("not.declared", Setting::Bool(true));

        testing_logger::validate(|captured_logs| {
            assert_eq!(captured_logs.len(), 2);
            assert!(captured_logs.iter().all(|log| log.level == log::Level::Warn));
        });
        assert_eq!(store.get("loader.cache.enabled"), Some(Setting::Bool(true)));
    }

    #[test]
    fn macro_usage() {
        config_store_write().set_storage(Box::new(MemoryStorageAdapter::new()));

        config_set!(string "inspect.sample_text", "Hello".into());
        assert_eq!(config!(string "inspect.sample_text"), "Hello");
        assert_eq!(config!(uint "this.key.doesnt.exist"), 0);
    }
}
