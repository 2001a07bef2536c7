//! Loosely-typed config values
//!
//! JSON and TOML documents are converted into [`ConfigValue`] on load and
//! type-checked only when an accessor asks for a specific type.

use crate::duration::parse_duration;
use crate::error::{ConfigError, Result};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A single value read from a structured config document
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Table(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Name of the value's type, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Table(_) => "table",
        }
    }

    /// Integer view of a numeric value; floats truncate toward zero
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::Float(f) => Some(f.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s),
            Value::Array(items) => ConfigValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ConfigValue::Table(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::Boolean(b) => ConfigValue::Boolean(b),
            Value::Integer(i) => ConfigValue::Integer(i),
            Value::Float(f) => ConfigValue::Float(f),
            Value::String(s) => ConfigValue::String(s),
            Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            Value::Array(items) => ConfigValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Table(table) => {
                ConfigValue::Table(table.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Flat key to value mapping with typed lookups
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    entries: HashMap<String, ConfigValue>,
}

impl ValueTable {
    pub fn get(&self, key: &str) -> Result<&ConfigValue> {
        self.entries
            .get(key)
            .ok_or_else(|| ConfigError::missing(key))
    }

    pub fn int(&self, key: &str) -> Result<i64> {
        self.get(key)?
            .as_int()
            .ok_or_else(|| ConfigError::invalid_int(key))
    }

    pub fn string(&self, key: &str) -> Result<String> {
        self.get(key)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::invalid_string(key))
    }

    pub fn duration(&self, key: &str) -> Result<Duration> {
        let value = self.get(key)?;
        let raw = value.as_str().ok_or_else(|| {
            ConfigError::invalid_duration(key, format!("expected a string, found {}", value.kind()))
        })?;

        parse_duration(raw).map_err(|e| ConfigError::invalid_duration(key, e))
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(String, ConfigValue)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
