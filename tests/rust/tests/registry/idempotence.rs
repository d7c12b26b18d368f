//! Repeated and concurrent `get_logger` calls

use pretty_assertions::assert_eq;
use std::sync::{Arc, Barrier};
use std::thread;
use tests::{TestRegistry, WorkerContext};

#[test]
fn test_sequential_calls_return_same_logger() {
    let t = TestRegistry::new();
    let first = t.logger("x");
    let second = t.logger("x");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.handler_count_of("console"), 1);
}

#[test]
fn test_single_console_line_per_message() {
    let t = TestRegistry::new();
    t.logger("x");
    t.logger("x").info("once");

    assert_eq!(t.console.lines(), vec!["INFO       once".to_string()]);
}

#[test]
fn test_concurrent_calls_attach_one_console_handler() {
    const THREADS: usize = 16;
    let t = TestRegistry::new();
    let barrier = Arc::new(Barrier::new(THREADS));
    let ctx = WorkerContext::worker("shared");

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = t.registry.clone();
            let barrier = barrier.clone();
            let ctx = ctx.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.get_logger_in(&ctx, "x", "")
            })
        })
        .collect();

    let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let first = &loggers[0];
    assert!(loggers.iter().all(|logger| Arc::ptr_eq(first, logger)));
    assert_eq!(first.name(), "x-shared");
    assert_eq!(first.handler_count(), 1);
    assert_eq!(t.registry.configured_names(), vec!["x-shared".to_string()]);
}

#[test]
fn test_concurrent_file_handler_and_logger_creation() {
    const LOGGERS: usize = 32;
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("race.log");
    let t = TestRegistry::new();
    let barrier = Arc::new(Barrier::new(2));

    let creator = {
        let registry = t.registry.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            (0..LOGGERS)
                .map(|i| registry.get_logger_in(&WorkerContext::main(), &format!("svc.{i}"), ""))
                .collect::<Vec<_>>()
        })
    };

    barrier.wait();
    t.registry
        .add_file_handler(&path, tests::FileHandlerOptions::default())
        .unwrap();
    let loggers = creator.join().unwrap();

    // Attached exactly once: either immediately or on creation, never both
    for logger in &loggers {
        assert_eq!(logger.handler_count_of("file"), 1, "{}", logger.name());
    }
}
