//! File handler appending `timestamp - LEVEL - name - message` lines

use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use super::{write_through, Handler};
use crate::error::{LogError, Result};
use crate::level::Level;
use crate::record::LogRecord;

/// Timestamp layout of file records, e.g. `2026-01-22 14:03:07,512`
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Handler appending plain-text records to a file
pub struct FileHandler {
    path: PathBuf,
    level: Level,
    appender: RollingFileAppender,
}

impl FileHandler {
    /// Open `path` for appending without rotation
    pub fn open(path: impl AsRef<Path>, level: Level) -> Result<Self> {
        Self::open_with_rotation(path, level, Rotation::NEVER)
    }

    /// Open `path` for appending. With a rotation other than `NEVER`, the
    /// active file name carries a date suffix (`<path>.<date>`).
    pub fn open_with_rotation(path: impl AsRef<Path>, level: Level, rotation: Rotation) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = match path.file_name() {
            Some(name) => name.to_str().map(str::to_string).ok_or_else(|| {
                LogError::destination(
                    &path,
                    io::Error::new(io::ErrorKind::InvalidInput, "file name is not valid UTF-8"),
                )
            })?,
            None => {
                return Err(LogError::destination(
                    &path,
                    io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
                ))
            }
        };
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // The appender would create missing directories; a destination whose
        // directory doesn't exist is a configuration problem instead.
        if !directory.is_dir() {
            return Err(LogError::destination(
                &path,
                io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
            ));
        }

        // Building opens (and creates) the active file, so nothing is left
        // behind when it fails.
        let appender = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(file_name)
            .build(&directory)
            .map_err(|e| LogError::destination(&path, io::Error::new(io::ErrorKind::Other, e)))?;

        Ok(Self {
            path,
            level,
            appender,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn format(&self, record: &LogRecord) -> String {
        format!(
            "{} - {} - {} - {}\n",
            record.timestamp.format(FILE_TIMESTAMP_FORMAT),
            record.level.name(),
            record.logger_name,
            record.message
        )
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        write_through(&self.appender, line)
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

impl std::fmt::Debug for FileHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandler")
            .field("path", &self.path)
            .field("level", &self.level)
            .finish()
    }
}
