use crate::errors::Error;
use crate::settings::Setting;
use crate::{StorageAdapter, LOG_TARGET};
use glyphsheet_shared::types::Result;
use log::warn;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Stores settings as a flat json object of `"key": "typed value"` pairs
pub struct JsonStorageAdapter {
    path: PathBuf,
    elements: Mutex<HashMap<String, Setting>>,
}

impl TryFrom<&Path> for JsonStorageAdapter {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> Result<Self> {
        if let Ok(metadata) = fs::metadata(path) {
            if !metadata.is_file() {
                return Err(Error::Config(format!("{} is not a regular file", path.display())).into());
            }
        } else {
            fs::write(path, "{}").map_err(Error::from)?;
        }

        let adapter = JsonStorageAdapter {
            path: path.to_path_buf(),
            elements: Mutex::new(read_file(path)?),
        };

        Ok(adapter)
    }
}

impl StorageAdapter for JsonStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        let lock = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        lock.get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        let mut lock = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        lock.insert(key.to_owned(), value);

        if let Err(err) = write_file(&self.path, &lock) {
            warn!(target: LOG_TARGET, "problem writing settings to {}: {err}", self.path.display());
        }
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        let lock = self.elements.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(lock.clone())
    }
}

/// Reads the whole json file. Entries that cannot be parsed are skipped with a warning.
fn read_file(path: &Path) -> Result<HashMap<String, Setting>> {
    let buf = fs::read_to_string(path).map_err(Error::from)?;
    let parsed_json: Value = serde_json::from_str(&buf).map_err(Error::from)?;

    let mut elements = HashMap::new();
    if let Value::Object(settings) = parsed_json {
        for (key, value) in settings {
            match serde_json::from_value(value) {
                Ok(setting) => {
                    elements.insert(key, setting);
                }
                Err(err) => {
                    warn!(target: LOG_TARGET, "problem reading setting {key} from json: {err}");
                }
            }
        }
    }

    Ok(elements)
}

/// Rewrites the file with all elements, sorted by key so the output is stable.
fn write_file(path: &Path, elements: &HashMap<String, Setting>) -> Result<()> {
    let sorted: BTreeMap<&String, &Setting> = elements.iter().collect();
    let json = serde_json::to_string_pretty(&sorted).map_err(Error::from)?;
    fs::write(path, json).map_err(Error::from)?;

    Ok(())
}
