use crate::errors::Error;
use crate::settings::Setting;
use crate::StorageAdapter;
use flyweight_shared::types::Result;
use log::{debug, warn};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings stored in a flat json object, keyed by dotted setting name:
///
/// ```json
/// { "canvas.width": "u:800", "scene.kinds": "m:line" }
/// ```
pub struct JsonStorageAdapter {
    path: PathBuf,
    elements: Mutex<HashMap<String, Setting>>,
}

impl JsonStorageAdapter {
    /// Opens the given json file. A missing file is treated as an empty one and only created on
    /// [`JsonStorageAdapter::flush`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let elements = if path.exists() {
            if !path.is_file() {
                let msg = format!("{} is not a regular file", path.display());
                return Err(Error::Config(msg).into());
            }
            read_file(&path)?
        } else {
            debug!("config: {} does not exist yet, starting empty", path.display());
            HashMap::new()
        };

        Ok(Self {
            path,
            elements: Mutex::new(elements),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drops a stored setting so the store falls back to its default. Returns the removed value.
    pub fn remove(&self, key: &str) -> Option<Setting> {
        self.elements.lock().remove(key)
    }

    /// Writes all settings back to the json file, replacing its contents
    pub fn flush(&self) -> Result<()> {
        let elements = self.elements.lock();

        let mut keys: Vec<&String> = elements.keys().collect();
        keys.sort();

        let mut object = serde_json::Map::new();
        for key in keys {
            object.insert(key.clone(), serde_json::to_value(&elements[key])?);
        }

        let json = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

/// Reads the whole json file. Entries that cannot be parsed are skipped with a warning.
fn read_file(path: &Path) -> Result<HashMap<String, Setting>> {
    let buf = fs::read_to_string(path).map_err(Error::from)?;
    let parsed_json: Value = serde_json::from_str(&buf).map_err(Error::from)?;

    let Value::Object(settings) = parsed_json else {
        let msg = format!("{} does not contain a json object", path.display());
        return Err(Error::Config(msg).into());
    };

    let mut elements = HashMap::new();
    for (key, value) in settings {
        match serde_json::from_value::<Setting>(value) {
            Ok(setting) => {
                elements.insert(key, setting);
            }
            Err(err) => {
                warn!("config: problem reading setting {key} from json: {err}");
            }
        }
    }

    Ok(elements)
}

impl StorageAdapter for JsonStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.elements.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.elements.lock().insert(key.to_owned(), value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.elements.lock().clone())
    }
}
