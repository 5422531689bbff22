use crate::settings::Setting;
use crate::StorageAdapter;
use glyphsheet_shared::types::Result;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

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

    fn settings(&self) -> MutexGuard<'_, HashMap<String, Setting>> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Seeds the adapter with initial settings
impl<K: Into<String>> FromIterator<(K, Setting)> for MemoryStorageAdapter {
    fn from_iter<I: IntoIterator<Item = (K, Setting)>>(iter: I) -> Self {
        Self {
            settings: Mutex::new(iter.into_iter().map(|(key, value)| (key.into(), value)).collect()),
        }
    }
}

impl StorageAdapter for MemoryStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.settings().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.settings().insert(key.to_owned(), value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.settings().clone())
    }
}
