//! Multi-format config reader
//!
//! One lookup interface over three file formats.
//!
//! ## Formats
//!
//! - **basic** - three lines per entry: key, `=`, value. `#` starts a comment line
//! - **json** - a single flat JSON object
//! - **toml** - a TOML document; top-level keys are the configs
//!
//! ## Lookups
//!
//! Every parser offers `int`, `string` and `duration` accessors returning a
//! [`Result`], plus `*_default` variants that fall back to a supplied value on
//! any lookup error. Durations are written as a number and a unit:
//!
//! ```text
//! 250ms   30s   5m   2h
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use multiconf::{ConfigFormat, ConfigParser};
//! use std::path::Path;
//!
//! let mut parser = ConfigFormat::Basic.parser();
//! parser.set_file(Path::new("/etc/app/app.conf"))?;
//! parser.load_config()?;
//! let name = parser.string_default("name", "app");
//! # Ok::<(), multiconf::ConfigError>(())
//! ```

pub mod duration;
pub mod error;
pub mod parser;
pub mod value;

// Re-export main types
pub use duration::{DurationUnit, parse_duration};
pub use error::{ConfigError, DurationError, Result, UnsupportedFormatError};
pub use parser::{
    BasicParser, ConfigFormat, ConfigParser, JsonParser, TomlParser, new_config_parser,
};
pub use value::{ConfigValue, ValueTable};
