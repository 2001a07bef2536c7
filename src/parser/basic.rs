//! Basic line-oriented config format
//!
//! Every entry spans three lines: the key, a lone `=`, and the value.
//!
//! ```text
//! # request handling
//! timeout
//! =
//! 30s
//! workers
//! =
//! 8
//! ```
//!
//! A line starting with `#` in key position is a comment and only occupies
//! that one line. Blank lines in key position are skipped as well. Values are
//! kept as raw strings and converted by the accessors.

use crate::duration::parse_duration;
use crate::error::{ConfigError, Result};
use crate::parser::{ConfigFormat, ConfigParser, expand_path};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Parser for the basic three-line format
#[derive(Debug, Default)]
pub struct BasicParser {
    path: Option<PathBuf>,
    file: Option<File>,
    entries: HashMap<String, String>,
}

impl BasicParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn raw(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::missing(key))
    }
}

impl ConfigParser for BasicParser {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Basic
    }

    /// Opens the file right away, so a bad path fails here
    fn set_file(&mut self, path: &Path) -> Result<()> {
        self.path = None;
        self.file = None;

        let path = expand_path(path);
        let file = File::open(&path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Failed to open config file");
            ConfigError::FileOpenFailed {
                path: path.clone(),
                source,
            }
        })?;

        self.path = Some(path);
        self.file = Some(file);
        Ok(())
    }

    fn load_config(&mut self) -> Result<()> {
        self.entries.clear();

        let (Some(path), Some(file)) = (self.path.as_ref(), self.file.as_mut()) else {
            return Err(ConfigError::FileNotSet);
        };

        // Start over on every load so repeated calls re-read the file
        file.rewind().map_err(|source| ConfigError::FileReadFailed {
            path: path.clone(),
            source,
        })?;

        let entries = parse_entries(BufReader::new(&*file), path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to load basic config");
        })?;

        debug!(path = %path.display(), entries = entries.len(), "Loaded basic config");
        self.entries = entries;
        Ok(())
    }

    fn int(&self, key: &str) -> Result<i64> {
        self.raw(key)?
            .parse()
            .map_err(|_| ConfigError::invalid_int(key))
    }

    fn string(&self, key: &str) -> Result<String> {
        self.raw(key).map(str::to_string)
    }

    fn duration(&self, key: &str) -> Result<Duration> {
        parse_duration(self.raw(key)?).map_err(|e| ConfigError::invalid_duration(key, e))
    }

    fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Read three-line records until the input runs out
fn parse_entries<R: BufRead>(reader: R, path: &Path) -> Result<HashMap<String, String>> {
    let mut lines = reader.lines().enumerate();
    let mut next_line = || -> Result<Option<(usize, String)>> {
        match lines.next() {
            Some((idx, Ok(line))) => Ok(Some((idx + 1, line))),
            Some((_, Err(source))) => Err(ConfigError::FileReadFailed {
                path: path.to_path_buf(),
                source,
            }),
            None => Ok(None),
        }
    };
    let invalid = |reason: String| ConfigError::InvalidFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut entries = HashMap::new();

    while let Some((line_no, key)) = next_line()? {
        if key.is_empty() || key.starts_with('#') {
            continue;
        }

        let Some((sep_line, separator)) = next_line()? else {
            return Err(invalid(format!(
                "key '{key}' on line {line_no} has no separator"
            )));
        };
        let Some((_, value)) = next_line()? else {
            return Err(invalid(format!("key '{key}' on line {line_no} has no value")));
        };

        if separator != "=" {
            return Err(invalid(format!(
                "expected '=' on line {sep_line}, found '{separator}'"
            )));
        }

        entries.insert(key, value);
    }

    Ok(entries)
}
