//! Logger Registry
//!
//! Owns every logger it has configured, the deferred file-handler
//! subscriptions and the console thresholds. All setup paths run under one
//! lock so that:
//!
//! - a logger name is configured at most once (one console handler, ever);
//! - a file handler registered concurrently with a logger's creation is
//!   attached to it exactly once, either immediately or by the
//!   attach-on-create hook.
//!
//! Emitting records does not touch the registry lock.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::thread::ThreadId;
use tracing::{debug, info};
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LogSettings;
use crate::error::Result;
use crate::handler::{ConsoleHandler, FileHandler, Palette};
use crate::level::{resolve_level, Level, LevelSpec};
use crate::logger::Logger;
use crate::thread_names::{ThreadNames, WorkerContext};

type WriterFactory = Arc<dyn Fn() -> BoxMakeWriter + Send + Sync>;

/// Which logger names a file handler applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    All,
    /// Names containing this substring
    Contains(String),
}

impl NameFilter {
    pub fn new(filter: &str) -> Self {
        if filter.is_empty() {
            Self::All
        } else {
            Self::Contains(filter.to_string())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Contains(needle) => name.contains(needle.as_str()),
        }
    }
}

/// A file handler waiting for matching loggers
#[derive(Debug, Clone)]
struct Subscription {
    filter: NameFilter,
    handler: Arc<FileHandler>,
}

/// Options for [`LoggerRegistry::add_file_handler`]
#[derive(Debug, Clone)]
pub struct FileHandlerOptions {
    /// Substring a logger name must contain; empty matches every logger
    pub filter: String,

    /// Threshold; unset means the configured file level
    pub level: LevelSpec,

    pub rotation: Rotation,
}

impl Default for FileHandlerOptions {
    fn default() -> Self {
        Self {
            filter: String::new(),
            level: LevelSpec::Unset,
            rotation: Rotation::NEVER,
        }
    }
}

impl FileHandlerOptions {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = level.into();
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

struct ConfiguredLogger {
    logger: Arc<Logger>,
    console: Arc<ConsoleHandler>,
}

struct RegistryState {
    configured: HashMap<String, ConfiguredLogger>,
    subscriptions: Vec<Subscription>,
    stream_level: Level,
    include_names: bool,
}

/// Process-wide logger registry
pub struct LoggerRegistry {
    settings: LogSettings,
    threads: ThreadNames,
    console_writer: WriterFactory,
    ansi: bool,
    palette: Palette,
    state: Mutex<RegistryState>,
}

impl LoggerRegistry {
    /// Registry writing console output to stdout
    pub fn new(settings: LogSettings) -> Self {
        Self::builder(settings).build()
    }

    /// Registry configured from `LOGWIRE_LOG_*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LogSettings::from_env()?))
    }

    pub fn builder(settings: LogSettings) -> LoggerRegistryBuilder {
        LoggerRegistryBuilder::new(settings)
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    /// Threshold new console handlers are created with
    pub fn stream_level(&self) -> Level {
        self.state.lock().stream_level
    }

    /// Get the logger for `name` on the calling thread, configuring it on first use.
    ///
    /// Worker threads receive `<name>-<suffix>`; see [`ThreadNames`].
    pub fn get_logger(&self, name: &str, emoji: &str) -> Arc<Logger> {
        let effective = self.threads.effective_name(name);
        self.configure(effective, emoji)
    }

    /// Like [`get_logger`](Self::get_logger), naming from an explicit worker context
    pub fn get_logger_in(&self, ctx: &WorkerContext, name: &str, emoji: &str) -> Arc<Logger> {
        self.configure(ctx.effective_name(name), emoji)
    }

    /// Look up an already configured logger by effective name
    pub fn logger(&self, effective_name: &str) -> Option<Arc<Logger>> {
        self.state
            .lock()
            .configured
            .get(effective_name)
            .map(|entry| entry.logger.clone())
    }

    /// Associate a logger-name suffix with the calling thread
    pub fn register_thread_name(&self, suffix: impl Into<String>) {
        self.threads.register(suffix);
    }

    fn configure(&self, name: String, emoji: &str) -> Arc<Logger> {
        let mut state = self.state.lock();
        if let Some(existing) = state.configured.get(&name) {
            return existing.logger.clone();
        }

        let console = Arc::new(
            ConsoleHandler::new(emoji, self.settings.show_time, state.stream_level, (self.console_writer)())
                .with_ansi(self.ansi)
                .with_palette(self.palette.clone()),
        );
        let logger = Arc::new(Logger::new(
            name.as_str(),
            self.settings.logger_floor(state.stream_level),
        ));
        logger.add_handler(console.clone());

        let mut attached = 0;
        for subscription in state.subscriptions.iter().filter(|s| s.filter.matches(&name)) {
            logger.add_handler(subscription.handler.clone());
            attached += 1;
        }

        if state.include_names {
            console.set_show_logger_name(true);
        }

        state.configured.insert(
            name,
            ConfiguredLogger {
                logger: logger.clone(),
                console,
            },
        );
        drop(state);

        // Diagnostics go out after unlocking: a subscriber may log through this registry.
        debug!(
            "[LoggerRegistry] Configured logger '{}' (level {}, {} file handler(s))",
            logger.name(),
            logger.level(),
            attached
        );
        logger
    }

    /// Open a file destination and attach it to every configured logger whose
    /// name matches the filter, and to every matching logger created later.
    ///
    /// Nothing is attached if the level is invalid or the file can't be opened.
    pub fn add_file_handler(
        &self,
        path: impl AsRef<Path>,
        options: FileHandlerOptions,
    ) -> Result<Arc<FileHandler>> {
        let level = resolve_level(options.level, self.settings.file_level)?;
        let handler = Arc::new(FileHandler::open_with_rotation(
            path.as_ref(),
            level,
            options.rotation,
        )?);
        let filter = NameFilter::new(&options.filter);

        let mut state = self.state.lock();
        let mut attached = 0;
        for entry in state.configured.values() {
            if filter.matches(entry.logger.name()) {
                entry.logger.add_handler(handler.clone());
                attached += 1;
            }
        }
        state.subscriptions.push(Subscription {
            filter,
            handler: handler.clone(),
        });
        drop(state);

        info!(
            "[LoggerRegistry] Added file handler {} (level {}, filter {:?}, attached to {} logger(s))",
            handler.path().display(),
            level,
            options.filter,
            attached
        );
        Ok(handler)
    }

    /// Shorthand for [`add_file_handler`](Self::add_file_handler) with a filter and level
    pub fn add_file_handler_with(
        &self,
        path: impl AsRef<Path>,
        filter: &str,
        level: impl Into<LevelSpec>,
    ) -> Result<Arc<FileHandler>> {
        self.add_file_handler(path, FileHandlerOptions::default().filter(filter).level(level))
    }

    /// Prefix console output with `[logger name]`, for existing and future loggers.
    ///
    /// There is no way to turn this back off.
    pub fn enable_logger_names_in_console_output(&self) {
        let mut state = self.state.lock();
        state.include_names = true;
        for entry in state.configured.values() {
            entry.console.set_show_logger_name(true);
        }
        let count = state.configured.len();
        drop(state);

        debug!(
            "[LoggerRegistry] Logger names enabled for {} console handler(s)",
            count
        );
    }

    pub fn logger_names_included(&self) -> bool {
        self.state.lock().include_names
    }

    /// Lower the console threshold used for loggers created from now on.
    ///
    /// Returns `false` (and changes nothing) if `level` would raise it.
    /// Handlers that already exist keep their threshold.
    pub fn set_default_stream_level(&self, level: Level) -> bool {
        let mut state = self.state.lock();
        let current = state.stream_level;
        if level > current {
            drop(state);
            debug!(
                "[LoggerRegistry] Ignoring stream level {} above current {}",
                level, current
            );
            return false;
        }
        state.stream_level = level;
        true
    }

    /// Effective names of all configured loggers, sorted
    pub fn configured_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().configured.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn file_handler_count(&self) -> usize {
        self.state.lock().subscriptions.len()
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("settings", &self.settings)
            .field("loggers", &self.configured_names())
            .field("file_handlers", &self.file_handler_count())
            .finish()
    }
}

/// Builder for [`LoggerRegistry`]
pub struct LoggerRegistryBuilder {
    settings: LogSettings,
    main_thread: Option<ThreadId>,
    console_writer: Option<WriterFactory>,
    ansi: Option<bool>,
    palette: Palette,
}

impl LoggerRegistryBuilder {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            settings,
            main_thread: None,
            console_writer: None,
            ansi: None,
            palette: Palette::default(),
        }
    }

    /// Treat `thread` as the unsuffixed main context instead of the thread named `main`
    pub fn main_thread(mut self, thread: ThreadId) -> Self {
        self.main_thread = Some(thread);
        self
    }

    /// Destination for console handlers (default: stdout)
    pub fn console_writer<M>(mut self, make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
    {
        self.console_writer = Some(Arc::new(move || BoxMakeWriter::new(make_writer.clone())));
        self
    }

    /// Style level labels with ANSI codes (default: only when stdout is a terminal)
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = Some(ansi);
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn build(self) -> LoggerRegistry {
        let custom_writer = self.console_writer.is_some();
        let ansi = self
            .ansi
            .unwrap_or_else(|| !custom_writer && std::io::stdout().is_terminal());
        let console_writer = self
            .console_writer
            .unwrap_or_else(|| Arc::new(|| BoxMakeWriter::new(std::io::stdout)));
        let threads = match self.main_thread {
            Some(id) => ThreadNames::with_main_thread(id),
            None => ThreadNames::new(),
        };
        let stream_level = self.settings.stream_level;

        LoggerRegistry {
            settings: self.settings,
            threads,
            console_writer,
            ansi,
            palette: self.palette,
            state: Mutex::new(RegistryState {
                configured: HashMap::new(),
                subscriptions: Vec::new(),
                stream_level,
                include_names: false,
            }),
        }
    }
}
