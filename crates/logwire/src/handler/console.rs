//! Console handler with emoji-decorated, severity-styled level labels

use colored::{Color, ColoredString, Colorize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use super::{write_through, Handler};
use crate::level::Level;
use crate::record::LogRecord;

/// Width the `<emoji><LEVEL>` label is padded to (in characters)
pub const LABEL_WIDTH: usize = 10;

const CONSOLE_TIME_FORMAT: &str = "[%x %X]";

/// Style key for a level, e.g. `logging.level.info`
pub fn style_key(level: Level) -> String {
    format!("logging.level.{}", level.name().to_lowercase())
}

/// Terminal attributes applied to a level label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelStyle {
    pub color: Option<Color>,
    pub bold: bool,
    pub dimmed: bool,
    pub reversed: bool,
}

impl LevelStyle {
    pub const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
            dimmed: false,
            reversed: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dimmed(mut self) -> Self {
        self.dimmed = true;
        self
    }

    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn paint(&self, text: &str) -> String {
        let mut styled = ColoredString::from(text);
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        if self.reversed {
            styled = styled.reversed();
        }
        styled.to_string()
    }
}

/// Style table keyed by [`style_key`]
#[derive(Debug, Clone)]
pub struct Palette {
    styles: HashMap<String, LevelStyle>,
}

impl Default for Palette {
    fn default() -> Self {
        let dim = LevelStyle::default().dimmed();
        Self::empty()
            .with_style("logging.level.notset", dim)
            .with_style("logging.level.trace", dim)
            .with_style("logging.level.debug", LevelStyle::color(Color::Green))
            .with_style("logging.level.info", LevelStyle::color(Color::Blue))
            .with_style("logging.level.warning", LevelStyle::color(Color::Red))
            .with_style("logging.level.error", LevelStyle::color(Color::Red).bold())
            .with_style(
                "logging.level.critical",
                LevelStyle::color(Color::Red).bold().reversed(),
            )
    }
}

impl Palette {
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, style: LevelStyle) -> Self {
        self.styles.insert(key.into(), style);
        self
    }

    pub fn style_for(&self, level: Level) -> Option<&LevelStyle> {
        self.styles.get(&style_key(level))
    }
}

/// Handler writing human-oriented lines to a console stream.
///
/// Layout: `[<time> ]<label> [<[name] >]<message>`. The label is
/// `<emoji><LEVEL>` left-justified to [`LABEL_WIDTH`] and styled per level.
pub struct ConsoleHandler {
    emoji: String,
    level: Level,
    show_time: bool,
    show_logger_name: AtomicBool,
    ansi: bool,
    palette: Palette,
    writer: BoxMakeWriter,
}

impl ConsoleHandler {
    pub fn new(emoji: &str, show_time: bool, level: Level, writer: BoxMakeWriter) -> Self {
        Self {
            emoji: normalize_emoji(emoji),
            level,
            show_time,
            show_logger_name: AtomicBool::new(false),
            ansi: false,
            palette: Palette::default(),
            writer,
        }
    }

    /// Enable or disable ANSI styling of the level label
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Switch name-prefixed formatting on or off for subsequent records
    pub fn set_show_logger_name(&self, show: bool) {
        self.show_logger_name.store(show, Ordering::Release);
    }

    pub fn shows_logger_name(&self) -> bool {
        self.show_logger_name.load(Ordering::Acquire)
    }

    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Padded, optionally styled level label
    pub fn level_label(&self, level: Level) -> String {
        let label = format!(
            "{:<width$}",
            format!("{}{}", self.emoji, level.name()),
            width = LABEL_WIDTH
        );
        match self.palette.style_for(level) {
            Some(style) if self.ansi => style.paint(&label),
            _ => label,
        }
    }
}

impl Handler for ConsoleHandler {
    fn level(&self) -> Level {
        self.level
    }

    fn format(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(record.message.len() + 32);
        if self.show_time {
            let _ = write!(line, "{} ", record.timestamp.format(CONSOLE_TIME_FORMAT));
        }
        line.push_str(&self.level_label(record.level));
        line.push(' ');
        if self.shows_logger_name() {
            let _ = write!(line, "[{}] ", record.logger_name);
        }
        line.push_str(&record.message);
        line.push('\n');
        line
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        write_through(&self.writer, line)
    }

    fn kind(&self) -> &'static str {
        "console"
    }
}

fn normalize_emoji(emoji: &str) -> String {
    if emoji.is_empty() || emoji.ends_with(char::is_whitespace) {
        emoji.to_string()
    } else {
        format!("{emoji} ")
    }
}
