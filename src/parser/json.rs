//! JSON config format
//!
//! The file must hold a single JSON object. Its top-level members become the
//! configs; nested objects and arrays are stored but fail every typed lookup.

use crate::error::{ConfigError, Result};
use crate::parser::{ConfigFormat, ConfigParser, expand_path};
use crate::value::{ConfigValue, ValueTable};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Parser for JSON config files
#[derive(Debug, Default)]
pub struct JsonParser {
    path: Option<PathBuf>,
    table: ValueTable,
}

impl JsonParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw JSON bytes into a value table. Invalid UTF-8 is a format error.
    pub fn parse_slice(content: &[u8], path: &Path) -> Result<ValueTable> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(content)
            .map_err(|e| {
                warn!(path = %path.display(), error = %e, "JSON config failed to parse");
                ConfigError::InvalidFormat {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            })?;

        Ok(object
            .into_iter()
            .map(|(key, value)| (key, ConfigValue::from(value)))
            .collect())
    }
}

impl ConfigParser for JsonParser {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Json
    }

    /// Only records the path; the file is first touched by `load_config`
    fn set_file(&mut self, path: &Path) -> Result<()> {
        self.path = Some(expand_path(path));
        Ok(())
    }

    fn load_config(&mut self) -> Result<()> {
        self.table.clear();

        let path = self.path.as_ref().ok_or(ConfigError::FileNotSet)?;
        let content = std::fs::read(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.clone(),
            source,
        })?;

        let table = Self::parse_slice(&content, path)?;
        debug!(path = %path.display(), entries = table.len(), "Loaded JSON config");
        self.table = table;
        Ok(())
    }

    fn int(&self, key: &str) -> Result<i64> {
        self.table.int(key)
    }

    fn string(&self, key: &str) -> Result<String> {
        self.table.string(key)
    }

    fn duration(&self, key: &str) -> Result<Duration> {
        self.table.duration(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.table.keys()
    }
}
