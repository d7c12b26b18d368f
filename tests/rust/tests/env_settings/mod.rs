//! Global registry created from `LOGWIRE_LOG_*` variables
//!
//! Runs in its own process: the variables must be set before the global
//! registry is first touched.

use logwire::config::{FILE_LEVEL_VAR, SHOW_TIME_VAR, STREAM_LEVEL_VAR};
use logwire::{Level, LogSettings};
use pretty_assertions::assert_eq;

#[test]
fn test_settings_come_from_environment() -> anyhow::Result<()> {
    std::env::set_var(STREAM_LEVEL_VAR, "warning");
    std::env::set_var(FILE_LEVEL_VAR, "15");
    std::env::set_var(SHOW_TIME_VAR, "yes");

    let expected = LogSettings {
        stream_level: Level::WARNING,
        file_level: Level::new(15),
        show_time: true,
    };
    assert_eq!(LogSettings::from_env()?, expected);

    let registry = logwire::global();
    assert_eq!(registry.settings(), &expected);
    assert_eq!(registry.stream_level(), Level::WARNING);
    assert_eq!(logwire::get_logger("svc", "").level(), Level::new(15));
    Ok(())
}
