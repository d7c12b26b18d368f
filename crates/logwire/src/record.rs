//! A single emitted log record

use chrono::{DateTime, Local};

use crate::level::Level;

/// Record passed from a logger to each of its handlers
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Creation time (local clock)
    pub timestamp: DateTime<Local>,

    pub level: Level,

    /// Effective name of the emitting logger
    pub logger_name: String,

    pub message: String,
}

impl LogRecord {
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            logger_name: logger_name.into(),
            message: message.into(),
        }
    }

    /// Override the timestamp (deterministic formatting)
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
