//! # Logwire
//!
//! Process-wide registry of named loggers for multi-threaded programs.
//!
//! ## Modules
//!
//! - `level` - Severity levels and level-spec resolution
//! - `config` - Thresholds read from the environment
//! - `thread_names` - Per-thread logger name suffixes
//! - `handler` - Console and file handlers
//! - `logger` - The logger handle returned to callers
//! - `registry` - Idempotent logger setup and late-bound file handlers
//! - `capture` - In-memory console destination
//!
//! ## Usage
//!
//! ```ignore
//! let log = logwire::get_logger("agent", "🤖");
//! log.info("starting");
//!
//! // From now on every logger whose name contains "agent" also writes here
//! logwire::add_file_handler("/tmp/agent.log", FileHandlerOptions::default().filter("agent"))?;
//! ```
//!
//! The free functions operate on a lazily created global registry. Code that
//! wants isolation (tests, embedded use) builds its own [`LoggerRegistry`].

pub mod capture;
pub mod config;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod record;
pub mod registry;
pub mod thread_names;

pub use capture::CapturedOutput;
pub use config::LogSettings;
pub use error::{LogError, Result};
pub use handler::{ConsoleHandler, FileHandler, Handler};
pub use level::{resolve_level, Level, LevelSpec};
pub use logger::Logger;
pub use record::LogRecord;
pub use registry::{FileHandlerOptions, LoggerRegistry, LoggerRegistryBuilder, NameFilter};
pub use thread_names::{ThreadNames, WorkerContext};
pub use tracing_appender::rolling::Rotation;

use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

/// Name of the logger returned by [`default_logger`]
pub const DEFAULT_LOGGER_NAME: &str = "logwire";

static GLOBAL: OnceCell<LoggerRegistry> = OnceCell::new();

/// The global registry, created from the environment on first use.
///
/// An invalid environment falls back to default settings with a warning on
/// stderr rather than failing the caller.
pub fn global() -> &'static LoggerRegistry {
    GLOBAL.get_or_init(|| {
        let settings = LogSettings::from_env().unwrap_or_else(|e| {
            eprintln!("Warning: {}; using default log settings", e);
            LogSettings::default()
        });
        LoggerRegistry::new(settings)
    })
}

/// Install `registry` as the global registry. Fails if one already exists.
pub fn install_global(registry: LoggerRegistry) -> Result<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| LogError::AlreadyInitialized)
}

/// See [`LoggerRegistry::get_logger`]
pub fn get_logger(name: &str, emoji: &str) -> Arc<Logger> {
    global().get_logger(name, emoji)
}

/// The global registry's general-purpose logger
pub fn default_logger() -> Arc<Logger> {
    global().get_logger(DEFAULT_LOGGER_NAME, "")
}

/// See [`LoggerRegistry::register_thread_name`]
pub fn register_thread_name(suffix: impl Into<String>) {
    global().register_thread_name(suffix);
}

/// See [`LoggerRegistry::add_file_handler`]
pub fn add_file_handler(path: impl AsRef<Path>, options: FileHandlerOptions) -> Result<Arc<FileHandler>> {
    global().add_file_handler(path, options)
}

/// See [`LoggerRegistry::enable_logger_names_in_console_output`]
pub fn enable_logger_names_in_console_output() {
    global().enable_logger_names_in_console_output();
}

/// See [`LoggerRegistry::set_default_stream_level`]
pub fn set_default_stream_level(level: Level) -> bool {
    global().set_default_stream_level(level)
}
