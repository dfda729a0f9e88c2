//! Line-oriented tracing output.
//!
//! A page has no file system and no terminal, only a console. [`ConsoleLayer`]
//! renders each tracing event as a single line
//! (`LEVEL target: message key=value ...`) and hands it to a [`LogSink`]. The
//! browser binding supplies a sink that writes to the devtools console; tests
//! use [`BufferSink`].
//!
//! ```ignore
//! use showroom_core::logging::{BufferSink, LoggingBuilder};
//!
//! let sink = BufferSink::default();
//! LoggingBuilder::new()
//!     .with_filter("showroom_core=debug")
//!     .init(sink.clone())?;
//! ```

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::{ShowroomError, ShowroomResult};

/// Filter used when none is given.
pub const DEFAULT_FILTER: &str = "showroom=info,showroom_core=info";

/// Destination for rendered log lines.
pub trait LogSink: Send + Sync + 'static {
    fn emit(&self, level: Level, line: &str);
}

/// Sink that keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl BufferSink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|(_, line)| line.contains(needle))
    }
}

impl LogSink for BufferSink {
    fn emit(&self, level: Level, line: &str) {
        self.lines.lock().push((level, line.to_string()));
    }
}

/// A tracing Layer writing one line per event into a [`LogSink`].
pub struct ConsoleLayer<S> {
    sink: S,
}

impl<S: LogSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, Sub>) {
        let metadata = event.metadata();

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let mut line = format!("{} {}", metadata.level(), metadata.target());
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                let _ = write!(line, " [{}]", spans.join(" > "));
            }
        }
        let _ = write!(line, ": {}", visitor.message.unwrap_or_default());
        for (name, value) in visitor.fields {
            let _ = write!(line, " {}={}", name, value);
        }

        self.sink.emit(*metadata.level(), &line);
    }
}

/// Visitor that splits the message from the other fields.
#[derive(Default)]
struct LineVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }
}

/// Builder for the page's tracing subscriber.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    env_filter: Option<String>,
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter directives (e.g. "showroom_core=debug").
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Build the subscriber without installing it.
    pub fn build<S: LogSink>(self, sink: S) -> ShowroomResult<impl Subscriber + Send + Sync + 'static> {
        let directives = self.env_filter.as_deref().unwrap_or(DEFAULT_FILTER);
        let filter = EnvFilter::try_new(directives)
            .map_err(|e| ShowroomError::Logging(format!("invalid log filter {:?}: {}", directives, e)))?;

        Ok(tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer::new(sink)))
    }

    /// Install as the global default subscriber.
    pub fn init<S: LogSink>(self, sink: S) -> ShowroomResult<()> {
        let subscriber = self.build(sink)?;
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| ShowroomError::Logging(format!("logging already initialized: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_message_and_fields() {
        let sink = BufferSink::default();
        let subscriber = LoggingBuilder::new()
            .with_filter("showroom_core=debug")
            .build(sink.clone())
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(theme = "sport", "theme changed");
            tracing::debug!(count = 3, "elements revealed");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Level::INFO);
        assert_eq!(
            lines[0].1,
            "INFO showroom_core::logging::tests: theme changed theme=sport"
        );
        assert!(lines[1].1.ends_with("elements revealed count=3"));
    }

    #[test]
    fn filter_drops_lower_levels() {
        let sink = BufferSink::default();
        let subscriber = LoggingBuilder::new().build(sink.clone()).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden");
            tracing::warn!("shown");
        });

        assert!(!sink.contains("hidden"));
        assert!(sink.contains("shown"));
    }

    #[test]
    fn bad_filter_is_an_error() {
        let result = LoggingBuilder::new()
            .with_filter("showroom_core=loud")
            .build(BufferSink::default());
        assert!(matches!(result, Err(ShowroomError::Logging(_))));
    }

    #[test]
    fn second_install_is_an_error() {
        let first = LoggingBuilder::new().init(BufferSink::default());
        let second = LoggingBuilder::new().init(BufferSink::default());
        assert!(first.is_ok() || matches!(first, Err(ShowroomError::Logging(_))));
        assert!(matches!(second, Err(ShowroomError::Logging(_))));
    }
}
