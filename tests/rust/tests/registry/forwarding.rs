//! Registry diagnostics routed back into the registry by a tracing layer

use pretty_assertions::assert_eq;
use std::fmt;
use std::sync::Arc;
use tempfile::TempDir;
use tests::{FileHandlerOptions, Level, LoggerRegistry, TestRegistry};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Writes every tracing event to the `diagnostics` logger of a registry
struct ForwardToRegistry {
    registry: Arc<LoggerRegistry>,
}

#[derive(Default)]
struct Message(String);

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for ForwardToRegistry {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = Message::default();
        event.record(&mut message);
        self.registry.get_logger("diagnostics", "").info(message.0);
    }
}

#[test]
fn test_diagnostics_can_log_through_the_registry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let t = TestRegistry::new();
    let subscriber = tracing_subscriber::registry().with(ForwardToRegistry {
        registry: t.registry.clone(),
    });

    tracing::subscriber::with_default(subscriber, || -> anyhow::Result<()> {
        t.logger("svc").info("hello");
        t.registry
            .add_file_handler(dir.path().join("all.log"), FileHandlerOptions::default())?;
        t.registry.enable_logger_names_in_console_output();
        assert!(!t.registry.set_default_stream_level(Level::CRITICAL));
        Ok(())
    })?;

    assert_eq!(
        t.registry.configured_names(),
        vec!["diagnostics".to_string(), "svc".to_string()]
    );
    let lines = t.console.lines();
    assert!(lines.contains(&"INFO       hello".to_string()));
    assert!(lines
        .iter()
        .any(|line| line.contains("[LoggerRegistry] Added file handler")));
    Ok(())
}
