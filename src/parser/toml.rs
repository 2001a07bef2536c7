//! TOML config format
//!
//! Top-level keys of the document are the configs. Tables and arrays are
//! kept but, as with JSON, fail every typed lookup. Datetimes read back as
//! strings in their RFC 3339 form.

use crate::error::{ConfigError, Result};
use crate::parser::{ConfigFormat, ConfigParser, expand_path};
use crate::value::{ConfigValue, ValueTable};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Parser for TOML config files
#[derive(Debug, Default)]
pub struct TomlParser {
    path: Option<PathBuf>,
    table: ValueTable,
}

impl TomlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text into a value table
    pub fn parse_str(content: &str, path: &Path) -> Result<ValueTable> {
        let document: ::toml::Table = content.parse().map_err(|e: ::toml::de::Error| {
            warn!(path = %path.display(), error = %e, "TOML config failed to parse");
            ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            }
        })?;

        Ok(document
            .into_iter()
            .map(|(key, value)| (key, ConfigValue::from(value)))
            .collect())
    }
}

impl ConfigParser for TomlParser {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Toml
    }

    fn set_file(&mut self, path: &Path) -> Result<()> {
        self.path = Some(expand_path(path));
        Ok(())
    }

    fn load_config(&mut self) -> Result<()> {
        self.table.clear();

        let path = self.path.as_ref().ok_or(ConfigError::FileNotSet)?;
        let bytes = std::fs::read(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|e| ConfigError::InvalidFormat {
            path: path.clone(),
            reason: e.utf8_error().to_string(),
        })?;

        let table = Self::parse_str(&content, path)?;
        debug!(path = %path.display(), entries = table.len(), "Loaded TOML config");
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
