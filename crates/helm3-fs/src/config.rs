//! YAML configuration loading and saving

use crate::{Error, NormalizedPath, Result, io};
use serde::{Serialize, de::DeserializeOwned};

/// Reads and writes YAML configuration files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a YAML document.
    ///
    /// A file that is empty or only whitespace loads as `T::default()`.
    pub fn load<T: DeserializeOwned + Default>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Serialize `value` as YAML and write it atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = serde_yaml::to_string(value).map_err(|e| Error::ConfigSerialize {
            path: path.to_native(),
            message: e.to_string(),
        })?;

        io::write_atomic(path, content.as_bytes())
    }
}
