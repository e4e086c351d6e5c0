//! Console logger used by the command handlers.
use super::subscriber::STAGE_TARGET;

/// Thin front end over [`tracing`] events.
///
/// Every event carries the running subcommand as a `command` field, and
/// stage headers always use the [`STAGE_TARGET`] target.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    command: &'static str,
}

impl Logger {
    /// Create a logger for `command`.
    #[must_use]
    pub const fn new(command: &'static str) -> Self {
        Self { command }
    }

    /// Name of the running subcommand.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        self.command
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!(command = self.command, "{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!(command = self.command, "{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, command = self.command, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!(command = self.command, "{msg}");
    }

    /// Log a debug message (hidden unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!(command = self.command, "{msg}");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use tracing_subscriber::layer::{Context, SubscriberExt as _};

    use super::*;
    use crate::logging::subscriber::MessageExtractor;

    #[derive(Debug, Clone)]
    struct Recorded {
        level: tracing::Level,
        target: String,
        message: String,
        fields: String,
    }

    struct Recorder(Arc<Mutex<Vec<Recorded>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Recorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut extractor = MessageExtractor::default();
            event.record(&mut extractor);
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Recorded {
                    level: *event.metadata().level(),
                    target: event.metadata().target().to_string(),
                    message: extractor.message,
                    fields: extractor.fields,
                });
        }
    }

    fn record(emit: impl FnOnce(&Logger)) -> Vec<Recorded> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Recorder(Arc::clone(&events)));
        let log = Logger::new("fmt");
        tracing::subscriber::with_default(subscriber, || emit(&log));
        events.lock().unwrap().clone()
    }

    #[test]
    fn stage_uses_stage_target() {
        let events = record(|log| log.stage("Formatting"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, tracing::Level::INFO);
        assert_eq!(events[0].target, STAGE_TARGET);
        assert_eq!(events[0].message, "Formatting");
    }

    #[test]
    fn levels_map_to_tracing_levels() {
        let events = record(|log| {
            log.error("e");
            log.warn("w");
            log.info("i");
            log.debug("d");
        });
        let levels: Vec<_> = events.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            [
                tracing::Level::ERROR,
                tracing::Level::WARN,
                tracing::Level::INFO,
                tracing::Level::DEBUG
            ]
        );
        assert!(events.iter().all(|e| e.target != STAGE_TARGET));
    }

    #[test]
    fn events_carry_command_field() {
        let events = record(|log| log.info("hello"));
        assert_eq!(events[0].fields, " command=fmt");
        assert_eq!(Logger::new("set").command(), "set");
    }
}
