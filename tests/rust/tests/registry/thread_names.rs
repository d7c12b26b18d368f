//! Per-thread effective logger names

use pretty_assertions::assert_eq;
use std::thread;
use tests::{TestRegistry, WorkerContext};

#[test]
fn test_main_thread_uses_base_name() {
    let t = TestRegistry::new();
    assert_eq!(t.logger("svc").name(), "svc");
}

#[test]
fn test_registered_suffix() {
    let t = TestRegistry::new();
    let registry = t.registry.clone();

    let name = thread::spawn(move || {
        registry.register_thread_name("worker-1");
        registry.get_logger("svc", "").name().to_string()
    })
    .join()
    .unwrap();

    assert_eq!(name, "svc-worker-1");
}

#[test]
fn test_unregistered_thread_uses_own_name() {
    let t = TestRegistry::new();
    let registry = t.registry.clone();

    let name = thread::Builder::new()
        .name("fetcher".to_string())
        .spawn(move || registry.get_logger("svc", "").name().to_string())
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(name, "svc-fetcher");
}

#[test]
fn test_workers_get_distinct_loggers() {
    let t = TestRegistry::new();

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let registry = t.registry.clone();
            thread::spawn(move || {
                registry.register_thread_name(format!("w{i}"));
                registry.get_logger("svc", "").info(format!("hello from {i}"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        t.registry.configured_names(),
        vec!["svc-w0".to_string(), "svc-w1".to_string(), "svc-w2".to_string()]
    );
    assert_eq!(t.console.lines().len(), 3);
}

#[test]
fn test_worker_context_ignores_ambient_thread() {
    let t = TestRegistry::new();
    let registry = t.registry.clone();
    let ctx = WorkerContext::worker("job-7");

    let name = thread::spawn(move || {
        registry.register_thread_name("ambient");
        registry.get_logger_in(&ctx, "svc", "").name().to_string()
    })
    .join()
    .unwrap();

    assert_eq!(name, "svc-job-7");
}
