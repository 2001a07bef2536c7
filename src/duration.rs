//! Duration lexing
//!
//! Turns raw values such as `"250ms"`, `"30s"` or `"2 h"` into a
//! [`Duration`]. The unit is picked by the first matching pattern in the
//! order millisecond, second, minute, hour. The coefficient is the first run
//! of digits anywhere in the value, found by a separate scan.
//!
//! Matching is lenient: one arbitrary character may sit between the number
//! and the unit, so `"5xms"` is five milliseconds.

use crate::error::DurationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

/// Unit of a duration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl DurationUnit {
    /// Get the unit suffix as written in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Millisecond => "ms",
            DurationUnit::Second => "s",
            DurationUnit::Minute => "m",
            DurationUnit::Hour => "h",
        }
    }

    /// Units in matching priority order
    pub fn all() -> &'static [DurationUnit] {
        &[
            DurationUnit::Millisecond,
            DurationUnit::Second,
            DurationUnit::Minute,
            DurationUnit::Hour,
        ]
    }

    /// Multiply `coefficient` by this unit, or `None` on overflow
    pub fn scale(self, coefficient: u64) -> Option<Duration> {
        match self {
            DurationUnit::Millisecond => Some(Duration::from_millis(coefficient)),
            DurationUnit::Second => Some(Duration::from_secs(coefficient)),
            DurationUnit::Minute => coefficient.checked_mul(60).map(Duration::from_secs),
            DurationUnit::Hour => coefficient.checked_mul(3600).map(Duration::from_secs),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct UnitPattern {
    unit: DurationUnit,
    regex: Regex,
}

static UNIT_PATTERNS: LazyLock<Vec<UnitPattern>> = LazyLock::new(|| {
    DurationUnit::all()
        .iter()
        .map(|&unit| UnitPattern {
            unit,
            regex: Regex::new(&format!("[0-9]+.?{}", unit.as_str())).unwrap(),
        })
        .collect()
});

static COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").unwrap());

/// Find the unit of a raw value, honouring pattern priority
pub fn detect_unit(raw: &str) -> Option<DurationUnit> {
    UNIT_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(raw))
        .map(|p| p.unit)
}

/// Parse a raw config value into a [`Duration`]
pub fn parse_duration(raw: &str) -> Result<Duration, DurationError> {
    let unit = detect_unit(raw).ok_or(DurationError::MissingUnit)?;

    let digits = COEFFICIENT
        .find(raw)
        .map(|m| m.as_str())
        .ok_or(DurationError::MissingUnit)?;

    let coefficient: u64 = digits
        .parse()
        .map_err(|_| DurationError::InvalidCoefficient(digits.to_string()))?;

    unit.scale(coefficient).ok_or(DurationError::Overflow {
        coefficient,
        unit: unit.as_str(),
    })
}
