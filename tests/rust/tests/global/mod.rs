//! Process-wide registry facade
//!
//! The global registry lives for the whole test process, so everything that
//! touches it runs in one test.

use logwire::{CapturedOutput, FileHandlerOptions, Level, LogError, LogSettings, LoggerRegistry};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;
use tests::{read_lines, records};

#[test]
fn test_global_facade() -> anyhow::Result<()> {
    let console = CapturedOutput::new();
    let registry = LoggerRegistry::builder(LogSettings::default())
        .main_thread(std::thread::current().id())
        .console_writer(console.clone())
        .ansi(false)
        .build();
    logwire::install_global(registry)?;

    let again = logwire::install_global(LoggerRegistry::new(LogSettings::default()));
    assert!(matches!(again, Err(LogError::AlreadyInitialized)));

    let default = logwire::default_logger();
    assert_eq!(default.name(), logwire::DEFAULT_LOGGER_NAME);
    assert!(Arc::ptr_eq(&default, &logwire::get_logger("logwire", "")));

    let dir = TempDir::new()?;
    let path = dir.path().join("global.log");
    logwire::add_file_handler(&path, FileHandlerOptions::default().filter("jobs"))?;

    let name = std::thread::spawn(|| {
        logwire::register_thread_name("w1");
        let log = logwire::get_logger("jobs", "");
        log.info("picked up");
        log.name().to_string()
    })
    .join()
    .expect("worker panicked");
    assert_eq!(name, "jobs-w1");

    logwire::enable_logger_names_in_console_output();
    assert!(!logwire::set_default_stream_level(Level::CRITICAL));
    assert!(logwire::set_default_stream_level(Level::TRACE));
    logwire::get_logger("late", "").trace("visible");

    assert_eq!(
        console.lines(),
        vec![
            "INFO       picked up".to_string(),
            "TRACE      [late] visible".to_string(),
        ]
    );
    let file = read_lines(&path);
    assert_eq!(file.len(), 1);
    assert_eq!(
        records::parse(&file[0]),
        Some(("INFO".to_string(), "jobs-w1".to_string(), "picked up".to_string()))
    );
    Ok(())
}
