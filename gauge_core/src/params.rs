//! Runtime parameter system
//!
//! A key-value store nodes declare their parameters against. Values can be
//! loaded from a YAML file before nodes are constructed; a declared
//! parameter keeps a loaded value and otherwise falls back to its default.

use crate::error::{GaugeError, GaugeResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Shared parameter store; clones see the same values
#[derive(Clone, Default)]
pub struct RuntimeParams {
    /// BTreeMap keeps keys sorted for listing and saving
    params: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl RuntimeParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled from a YAML mapping file
    pub fn from_yaml_file(path: &Path) -> GaugeResult<Self> {
        let params = Self::new();
        params.load_from_yaml(path)?;
        Ok(params)
    }

    /// Declare a parameter with a default value and return its effective value
    ///
    /// A value already present (loaded or set earlier) wins over the default.
    /// A present value of the wrong type is a configuration error.
    pub fn declare<T>(&self, key: &str, default: T) -> GaugeResult<T>
    where
        T: Serialize + for<'de> Deserialize<'de>,
    {
        let existing = self.params.read().get(key).cloned();
        match existing {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                GaugeError::config(format!("parameter '{}' = {} is invalid: {}", key, value, e))
            }),
            None => {
                self.set(key, &default)?;
                Ok(default)
            }
        }
    }

    /// Get a parameter value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        let params = self.params.read();
        let value = params.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Get parameter with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get_or(key, default)
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get_or(key, default.to_string())
    }

    /// Set a parameter value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> GaugeResult<()> {
        let json_value = serde_json::to_value(value)?;
        self.params.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.read().contains_key(key)
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.params.read().keys().cloned().collect()
    }

    pub fn get_all(&self) -> BTreeMap<String, Value> {
        self.params.read().clone()
    }

    /// Merge values from a YAML mapping file, overwriting existing keys
    pub fn load_from_yaml(&self, path: &Path) -> GaugeResult<()> {
        let yaml_str = std::fs::read_to_string(path)?;
        let loaded: BTreeMap<String, Value> = serde_yaml::from_str(&yaml_str)?;
        self.params.write().extend(loaded);
        Ok(())
    }
}
