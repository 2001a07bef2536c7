//! Config parsers
//!
//! All formats implement [`ConfigParser`]. Pick one with [`new_config_parser`]
//! or [`ConfigFormat::parser`], bind a file, load it, then look values up:
//!
//! ```no_run
//! use multiconf::new_config_parser;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let mut parser = new_config_parser("json")?;
//! parser.set_file(Path::new("service.json"))?;
//! parser.load_config()?;
//!
//! let port = parser.int_default("port", 8080);
//! let timeout = parser.duration_default("timeout", Duration::from_secs(30));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A parser owns its mapping and has no internal locking. Share one across
//! threads only behind your own `Mutex`.

pub mod basic;
pub mod json;
pub mod toml;

pub use self::basic::BasicParser;
pub use self::json::JsonParser;
pub use self::toml::TomlParser;

use crate::error::{Result, UnsupportedFormatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Json,
    Basic,
    Toml,
}

impl ConfigFormat {
    /// Get the format tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Basic => "basic",
            ConfigFormat::Toml => "toml",
        }
    }

    /// Get all formats
    pub fn all() -> &'static [ConfigFormat] {
        &[ConfigFormat::Json, ConfigFormat::Basic, ConfigFormat::Toml]
    }

    /// Guess the format from a file extension, ignoring ASCII case.
    ///
    /// The basic format has no canonical extension, so it is never guessed.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        [ConfigFormat::Json, ConfigFormat::Toml]
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.as_str()))
    }

    /// Create an empty parser for this format
    pub fn parser(self) -> Box<dyn ConfigParser> {
        match self {
            ConfigFormat::Json => Box::new(JsonParser::new()),
            ConfigFormat::Basic => Box::new(BasicParser::new()),
            ConfigFormat::Toml => Box::new(TomlParser::new()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ConfigFormat::all()
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnsupportedFormatError(s.to_string()))
    }
}

/// Create a parser for a format tag (`"json"`, `"basic"` or `"toml"`)
pub fn new_config_parser(
    tag: &str,
) -> std::result::Result<Box<dyn ConfigParser>, UnsupportedFormatError> {
    let format: ConfigFormat = tag.parse()?;
    debug!(format = %format, "Creating config parser");
    Ok(format.parser())
}

/// Common contract of every config format
pub trait ConfigParser: fmt::Debug {
    /// Format handled by this parser
    fn format(&self) -> ConfigFormat;

    /// Bind the file the configs are read from
    fn set_file(&mut self, path: &Path) -> Result<()>;

    /// Read the bound file, replacing any previously loaded configs
    fn load_config(&mut self) -> Result<()>;

    /// Integer config for `key`
    fn int(&self, key: &str) -> Result<i64>;

    /// String config for `key`
    fn string(&self, key: &str) -> Result<String>;

    /// Duration config for `key`
    fn duration(&self, key: &str) -> Result<Duration>;

    /// Loaded keys, sorted
    fn keys(&self) -> Vec<&str>;

    /// Whether `key` was loaded
    fn contains(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Integer config for `key`, or `default` on any lookup error
    fn int_default(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or_else(|e| {
            debug!(key, error = %e, default, "Using default int config");
            default
        })
    }

    /// String config for `key`, or `default` on any lookup error
    fn string_default(&self, key: &str, default: &str) -> String {
        self.string(key).unwrap_or_else(|e| {
            debug!(key, error = %e, default, "Using default string config");
            default.to_string()
        })
    }

    /// Duration config for `key`, or `default` on any lookup error
    fn duration_default(&self, key: &str, default: Duration) -> Duration {
        self.duration(key).unwrap_or_else(|e| {
            debug!(key, error = %e, ?default, "Using default duration config");
            default
        })
    }
}

/// Expand a leading `~` so config paths can point into the home directory
pub(crate) fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trips_through_tag() {
        for format in ConfigFormat::all() {
            assert_eq!(format.as_str().parse::<ConfigFormat>().unwrap(), *format);
            assert_eq!(format.to_string(), format.as_str());
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(
            "yaml".parse::<ConfigFormat>().unwrap_err(),
            UnsupportedFormatError("yaml".into())
        );
        assert!("JSON".parse::<ConfigFormat>().is_err());
        assert!("".parse::<ConfigFormat>().is_err());
    }

    #[test]
    fn test_parser_reports_its_format() {
        for format in ConfigFormat::all() {
            assert_eq!(format.parser().format(), *format);
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("app.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("/etc/app/config.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("APP.JSON")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("app.Toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("app.basic")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("app.conf")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&ConfigFormat::Basic).unwrap();
        assert_eq!(json, "\"basic\"");
        let format: ConfigFormat = serde_json::from_str("\"toml\"").unwrap();
        assert_eq!(format, ConfigFormat::Toml);
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(
            expand_path(Path::new("/tmp/app.json")),
            PathBuf::from("/tmp/app.json")
        );
        assert_eq!(expand_path(Path::new("rel/app")), PathBuf::from("rel/app"));
    }

    #[test]
    fn test_expand_path_resolves_home() {
        let expanded = expand_path(Path::new("~/app.json"));
        assert!(!expanded.starts_with("~"), "{}", expanded.display());
        assert!(expanded.ends_with("app.json"));
    }
}
