//! Settings resolved from the process environment
//!
//! | Variable                    | Meaning                          | Default |
//! |-----------------------------|----------------------------------|---------|
//! | `LOGWIRE_LOG_STREAM_LEVEL`  | console threshold                | DEBUG   |
//! | `LOGWIRE_LOG_FILE_LEVEL`    | file threshold                   | TRACE   |
//! | `LOGWIRE_LOG_TIME`          | render timestamps on the console | off     |
//!
//! Values from a `.env` file fill in variables the process environment leaves
//! unset. The file is only read; the process environment is never modified.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::level::{resolve_level, Level};

pub const STREAM_LEVEL_VAR: &str = "LOGWIRE_LOG_STREAM_LEVEL";
pub const FILE_LEVEL_VAR: &str = "LOGWIRE_LOG_FILE_LEVEL";
pub const SHOW_TIME_VAR: &str = "LOGWIRE_LOG_TIME";

const VAR_PREFIX: &str = "LOGWIRE_";

/// Thresholds and console options, read once at registry construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum severity for console handlers
    pub stream_level: Level,

    /// Default minimum severity for file handlers
    pub file_level: Level,

    /// Whether console output carries a timestamp column
    pub show_time: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            stream_level: Level::DEBUG,
            file_level: Level::TRACE,
            show_time: false,
        }
    }
}

impl LogSettings {
    /// Read settings from the environment, falling back to `./.env` (or the
    /// nearest one up the directory tree) for unset variables
    pub fn from_env() -> Result<Self> {
        let file = dotenvy::dotenv_iter()
            .map(collect_vars)
            .unwrap_or_default();
        Self::from_env_and(file)
    }

    /// Like [`from_env`](Self::from_env), with an explicit `.env` path.
    /// A missing or unreadable file contributes nothing.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = dotenvy::from_path_iter(path)
            .map(collect_vars)
            .unwrap_or_default();
        Self::from_env_and(file)
    }

    fn from_env_and(file: HashMap<String, String>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            stream_level: resolve_level(lookup(STREAM_LEVEL_VAR), defaults.stream_level)?,
            file_level: resolve_level(lookup(FILE_LEVEL_VAR), defaults.file_level)?,
            show_time: lookup(SHOW_TIME_VAR).is_some_and(|v| parse_flag(&v)),
        })
    }

    /// Floor for a new logger so records reach whichever handler is more verbose
    pub fn logger_floor(&self, stream_level: Level) -> Level {
        stream_level.min(self.file_level)
    }
}

fn collect_vars<I>(entries: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
{
    entries
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|(key, _)| key.starts_with(VAR_PREFIX))
        .collect()
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !["0", "false", "no", "off"]
            .iter()
            .any(|off| value.eq_ignore_ascii_case(off))
}
