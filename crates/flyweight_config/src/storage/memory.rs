use crate::settings::Setting;
use crate::StorageAdapter;
use flyweight_shared::types::Result;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Keeps settings for the lifetime of the process only
#[derive(Default)]
pub struct MemoryStorageAdapter {
    settings: Mutex<HashMap<String, Setting>>,
}

impl MemoryStorageAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.settings.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.settings.lock().insert(key.to_owned(), value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.settings.lock().clone())
    }
}
