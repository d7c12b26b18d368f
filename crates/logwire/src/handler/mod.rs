//! Output handlers
//!
//! A handler owns a destination and a severity threshold. Loggers hold
//! handlers behind `Arc<dyn Handler>` so the same file destination can be
//! shared by every logger it is attached to.

mod console;
mod file;

pub use console::{style_key, ConsoleHandler, LevelStyle, Palette, LABEL_WIDTH};
pub use file::{FileHandler, FILE_TIMESTAMP_FORMAT};

use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

use crate::level::Level;
use crate::record::LogRecord;

/// A destination-specific sink
pub trait Handler: Send + Sync {
    /// Minimum severity this handler writes
    fn level(&self) -> Level;

    /// Render a record into a single line (including the trailing newline)
    fn format(&self, record: &LogRecord) -> String;

    /// Write an already-formatted line to the destination
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Short label for diagnostics
    fn kind(&self) -> &'static str;

    /// Format and write a record if it meets this handler's threshold.
    ///
    /// Returns `Ok(false)` when the record was filtered out.
    fn emit(&self, record: &LogRecord) -> io::Result<bool> {
        if record.level < self.level() {
            return Ok(false);
        }
        self.write_line(&self.format(record))?;
        Ok(true)
    }
}

/// Write a whole line through a fresh writer so concurrent records don't interleave
pub(crate) fn write_through<'a, M>(make_writer: &'a M, line: &str) -> io::Result<()>
where
    M: MakeWriter<'a>,
{
    let mut writer = make_writer.make_writer();
    writer.write_all(line.as_bytes())?;
    writer.flush()
}
