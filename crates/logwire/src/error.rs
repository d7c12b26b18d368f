//! Error types for logger setup

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring loggers or their destinations.
///
/// Emitting a record never returns an error; only setup does.
#[derive(Debug, Error)]
pub enum LogError {
    /// A level specification did not name a known severity
    #[error("Unknown log level: {spec:?}")]
    Configuration { spec: String },

    /// A file destination could not be created or opened for appending
    #[error("Cannot open log destination {}: {source}", path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process-wide registry was already initialized
    #[error("The global logger registry is already initialized")]
    AlreadyInitialized,
}

impl LogError {
    pub(crate) fn configuration(spec: impl Into<String>) -> Self {
        Self::Configuration { spec: spec.into() }
    }

    pub(crate) fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DestinationUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from an unrecognized level
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
