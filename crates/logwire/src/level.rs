//! Severity levels and level-spec resolution
//!
//! Severities are plain integers so callers can use custom levels between
//! the named ones. The named table matches the conventional layout:
//!
//! | Name       | Severity |
//! |------------|----------|
//! | `NOTSET`   | 0        |
//! | `TRACE`    | 5        |
//! | `DEBUG`    | 10       |
//! | `INFO`     | 20       |
//! | `WARNING`  | 30       |
//! | `ERROR`    | 40       |
//! | `CRITICAL` | 50       |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{LogError, Result};

/// A record or threshold severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u16);

impl Level {
    pub const NOTSET: Level = Level(0);
    pub const TRACE: Level = Level(5);
    pub const DEBUG: Level = Level(10);
    pub const INFO: Level = Level(20);
    pub const WARNING: Level = Level(30);
    pub const ERROR: Level = Level(40);
    pub const CRITICAL: Level = Level(50);

    const NAMED: [(&'static str, Level); 7] = [
        ("NOTSET", Level::NOTSET),
        ("TRACE", Level::TRACE),
        ("DEBUG", Level::DEBUG),
        ("INFO", Level::INFO),
        ("WARNING", Level::WARNING),
        ("ERROR", Level::ERROR),
        ("CRITICAL", Level::CRITICAL),
    ];

    pub const fn new(severity: u16) -> Self {
        Self(severity)
    }

    pub const fn severity(self) -> u16 {
        self.0
    }

    /// Canonical upper-case name, or `Level <n>` for unnamed severities
    pub fn name(self) -> Cow<'static, str> {
        Self::NAMED
            .iter()
            .find(|(_, level)| *level == self)
            .map(|(name, _)| Cow::Borrowed(*name))
            .unwrap_or_else(|| Cow::Owned(format!("Level {}", self.0)))
    }

    pub fn is_named(self) -> bool {
        Self::NAMED.iter().any(|(_, level)| *level == self)
    }

    /// Look up a symbolic name (case-insensitive). `WARN` and `FATAL` are aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "WARN" => return Some(Self::WARNING),
            "FATAL" => return Some(Self::CRITICAL),
            _ => {}
        }
        Self::NAMED
            .iter()
            .find(|(candidate, _)| *candidate == upper)
            .map(|(_, level)| *level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<u16> for Level {
    fn from(severity: u16) -> Self {
        Self(severity)
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Parses a numeric or symbolic level. Unlike [`resolve_level`], an empty
    /// string is an error here since there is no default to fall back to.
    fn from_str(s: &str) -> Result<Self> {
        parse_text(s)?.ok_or_else(|| LogError::configuration(s))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_named() {
            serializer.serialize_str(&self.name())
        } else {
            serializer.serialize_u16(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Severity(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Severity(severity) => Ok(Level(severity)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// An unresolved level: absent, already numeric, or text from configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelSpec {
    #[default]
    Unset,
    Severity(Level),
    Text(String),
}

impl From<Level> for LevelSpec {
    fn from(level: Level) -> Self {
        Self::Severity(level)
    }
}

impl From<u16> for LevelSpec {
    fn from(severity: u16) -> Self {
        Self::Severity(Level(severity))
    }
}

impl From<&str> for LevelSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: Into<LevelSpec>> From<Option<T>> for LevelSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map(Into::into).unwrap_or(Self::Unset)
    }
}

/// Resolve a level spec into a severity.
///
/// Absent, empty and zero specs resolve to `default`. Numeric strings are
/// parsed as severities; anything else must name a known level.
pub fn resolve_level(spec: impl Into<LevelSpec>, default: Level) -> Result<Level> {
    match spec.into() {
        LevelSpec::Unset => Ok(default),
        LevelSpec::Severity(level) if level == Level::NOTSET => Ok(default),
        LevelSpec::Severity(level) => Ok(level),
        LevelSpec::Text(text) => Ok(parse_text(&text)?.unwrap_or(default)),
    }
}

/// `Ok(None)` for blank input
fn parse_text(text: &str) -> Result<Option<Level>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<u16>()
            .map(|severity| Some(Level(severity)))
            .map_err(|_| LogError::configuration(text));
    }
    Level::from_name(trimmed)
        .map(Some)
        .ok_or_else(|| LogError::configuration(text))
}
