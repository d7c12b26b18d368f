//! Global registry created from an invalid environment
//!
//! Runs in its own process: the variable must be set before the global
//! registry is first touched.

use logwire::config::{FILE_LEVEL_VAR, SHOW_TIME_VAR, STREAM_LEVEL_VAR};
use logwire::{Level, LogSettings};
use pretty_assertions::assert_eq;

#[test]
fn test_invalid_level_falls_back_to_defaults() {
    std::env::set_var(STREAM_LEVEL_VAR, "bogus");
    std::env::set_var(FILE_LEVEL_VAR, "info");
    std::env::set_var(SHOW_TIME_VAR, "1");

    assert!(LogSettings::from_env().is_err());

    let registry = logwire::global();
    assert_eq!(registry.settings(), &LogSettings::default());
    assert_eq!(registry.stream_level(), Level::DEBUG);
    assert_eq!(logwire::default_logger().level(), Level::TRACE);
}
