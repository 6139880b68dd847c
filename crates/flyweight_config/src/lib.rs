//! Configuration store
//!
//! All known settings, with their type, default and description, live in `settings.json` which
//! is compiled into the binary. A [`ConfigStore`] starts out with those defaults and can be
//! backed by a [`StorageAdapter`] that supplies overrides (a json file, or just memory).
//!
//! There is no global store: the application creates one and passes it to whoever needs it.

mod errors;
pub mod settings;
pub mod storage;

pub use crate::errors::Error;
use crate::settings::{Setting, SettingInfo};
use crate::storage::MemoryStorageAdapter;
use flyweight_shared::types::Result;
use log::{debug, warn};
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::mem;
use std::str::FromStr;
use wildmatch::WildMatch;

/// Settings are described in a json file that is included in the binary for easy editing.
const SETTINGS_JSON: &str = include_str!("./settings.json");

/// `StorageAdapter` is the interface for storing and retrieving settings
pub trait StorageAdapter: Send + Sync {
    /// Retrieves a setting from the storage
    fn get(&self, key: &str) -> Option<Setting>;

    /// Stores a given setting. Takes `&self`, adapters use interior locking.
    fn set(&self, key: &str, value: Setting);

    /// Retrieves all the settings in the storage in one go. Used to preload a `ConfigStore`.
    fn all(&self) -> Result<HashMap<String, Setting>>;
}

/// Retrieve a typed setting from a store. Unknown keys give the type's empty value.
///
/// ```ignore
/// let shapes = config!(store, uint "scene.shapes");
/// ```
#[macro_export]
macro_rules! config {
    ($store:expr, string $key:expr) => {
        $store.get($key).map_or_else(String::new, |setting| setting.as_string())
    };
    ($store:expr, bool $key:expr) => {
        $store.get($key).is_some_and(|setting| setting.as_bool())
    };
    ($store:expr, uint $key:expr) => {
        $store.get($key).map_or(0, |setting| setting.as_uint())
    };
    ($store:expr, sint $key:expr) => {
        $store.get($key).map_or(0, |setting| setting.as_sint())
    };
    ($store:expr, map $key:expr) => {
        $store.get($key).map_or_else(Vec::new, |setting| setting.as_map())
    };
}

/// Store a typed setting in a store
#[macro_export]
macro_rules! config_set {
    ($store:expr, string $key:expr, $val:expr) => {
        $store.set($key, $crate::settings::Setting::String($val))
    };
    ($store:expr, bool $key:expr, $val:expr) => {
        $store.set($key, $crate::settings::Setting::Bool($val))
    };
    ($store:expr, uint $key:expr, $val:expr) => {
        $store.set($key, $crate::settings::Setting::UInt($val))
    };
    ($store:expr, sint $key:expr, $val:expr) => {
        $store.set($key, $crate::settings::Setting::SInt($val))
    };
    ($store:expr, map $key:expr, $val:expr) => {
        $store.set($key, $crate::settings::Setting::Map($val))
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

/// The place where the application finds all configurable options
pub struct ConfigStore {
    /// Current values of all settings that have been read or written
    settings: RwLock<HashMap<String, Setting>>,
    /// Descriptions, default values and type information of every known setting
    settings_info: HashMap<String, SettingInfo>,
    /// Keys of all settings, in the order they are described
    setting_keys: Vec<String>,
    /// The storage adapter used for persisting and loading keys
    storage: Box<dyn StorageAdapter>,
}

impl ConfigStore {
    /// Creates a store holding only the default settings, backed by memory
    pub fn new() -> Result<Self> {
        let mut store = Self {
            settings: RwLock::new(HashMap::new()),
            settings_info: HashMap::new(),
            setting_keys: Vec::new(),
            storage: Box::new(MemoryStorageAdapter::new()),
        };

        store.populate_default_settings()?;
        Ok(store)
    }

    /// Creates a store with the given storage adapter applied on top of the defaults
    pub fn with_storage(storage: Box<dyn StorageAdapter>) -> Result<Self> {
        let mut store = Self::new()?;
        store.set_storage(storage)?;
        Ok(store)
    }

    /// Sets a new storage engine and loads every setting it holds into the store, overwriting
    /// current values. Settings that are unknown or of the wrong type are skipped.
    pub fn set_storage(&mut self, storage: Box<dyn StorageAdapter>) -> Result<()> {
        self.storage = storage;

        let all_settings = self.storage.all()?;
        let mut settings = self.settings.write();
        for (key, value) in all_settings {
            if self.accepts(&key, &value) {
                debug!("config: loaded {key} = {value}");
                settings.insert(key, value);
            }
        }

        Ok(())
    }

    /// Returns true when the key is a known setting
    pub fn has(&self, key: &str) -> bool {
        self.settings_info.contains_key(key)
    }

    /// Returns the keys that match the given search string (`?` and `*` are wildcards)
    pub fn find(&self, search: &str) -> Vec<String> {
        let search = WildMatch::new(search);

        self.setting_keys
            .iter()
            .filter(|key| search.matches(key))
            .cloned()
            .collect()
    }

    /// Retrieves information about the given key, or returns None when key is unknown
    pub fn get_info(&self, key: &str) -> Option<SettingInfo> {
        self.settings_info.get(key).cloned()
    }

    /// Returns the setting with the given key. Falls back to the storage and then to the default
    /// value. Returns None only for unknown keys.
    pub fn get(&self, key: &str) -> Option<Setting> {
        if let Some(setting) = self.settings.read().get(key) {
            return Some(setting.clone());
        }

        if let Some(setting) = self.storage.get(key) {
            if self.accepts(key, &setting) {
                self.settings.write().insert(key.to_string(), setting.clone());
                return Some(setting);
            }
        }

        if let Some(info) = self.settings_info.get(key) {
            return Some(info.default.clone());
        }

        warn!("config: setting {key} is not known");
        None
    }

    /// Sets the given setting and persists it to the storage. Unknown keys and values of a
    /// different type than the default are rejected with a warning.
    pub fn set(&self, key: &str, value: Setting) {
        if !self.accepts(key, &value) {
            return;
        }

        self.settings.write().insert(key.to_owned(), value.clone());
        self.storage.set(key, value);
    }

    fn accepts(&self, key: &str, value: &Setting) -> bool {
        let Some(info) = self.settings_info.get(key) else {
            warn!("config: setting {key} is not known");
            return false;
        };

        if mem::discriminant(&info.default) != mem::discriminant(value) {
            warn!("config: setting {key} is of different type than setting expects");
            return false;
        }

        true
    }

    /// Populates the settings info from the settings.json file
    fn populate_default_settings(&mut self) -> Result<()> {
        let json_data: Value = serde_json::from_str(SETTINGS_JSON).map_err(Error::from)?;

        let Value::Object(data) = json_data else {
            return Err(Error::Config("settings.json is not an object".into()).into());
        };

        for (section_prefix, section_entries) in data {
            let section_entries: Vec<JsonEntry> =
                serde_json::from_value(section_entries).map_err(Error::from)?;

            for entry in section_entries {
                let key = format!("{}.{}", section_prefix, entry.key);

                let info = SettingInfo {
                    key: key.clone(),
                    description: entry.description,
                    default: Setting::from_str(&entry.default)?,
                };

                self.setting_keys.push(key.clone());
                self.settings_info.insert(key, info);
            }
        }

        Ok(())
    }
}
