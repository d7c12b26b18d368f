//! Named logger handle
//!
//! Loggers are flat: a record goes to the logger's own handlers and never
//! to any other logger's, regardless of dotted names.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// A named logger with its own severity floor and handler list
pub struct Logger {
    name: String,
    level: AtomicU16,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level: AtomicU16::new(level.severity()),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        Level::new(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level.severity(), Ordering::Relaxed);
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub(crate) fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn has_handlers(&self) -> bool {
        self.handler_count() > 0
    }

    /// Number of attached handlers of the given kind (`"console"`, `"file"`)
    pub fn handler_count_of(&self, kind: &str) -> usize {
        self.handlers
            .read()
            .iter()
            .filter(|handler| handler.kind() == kind)
            .count()
    }

    /// Emit a message at `level` to every handler whose threshold it meets
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(level, self.name.as_str(), message);
        self.dispatch(&record);
    }

    fn dispatch(&self, record: &LogRecord) {
        let handlers = self.handlers.read();
        for handler in handlers.iter() {
            if let Err(e) = handler.emit(record) {
                eprintln!(
                    "logwire: failed to write {} record for '{}': {}",
                    handler.kind(),
                    self.name,
                    e
                );
            }
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::TRACE, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::DEBUG, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::INFO, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::WARNING, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::ERROR, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::CRITICAL, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
