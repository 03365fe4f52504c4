//! Console Logger
//!
//! A `tracing` layer for WASM frontends. Events go to the browser console
//! (stderr off-wasm) and the most recent formatted lines stay in a circular
//! buffer so the app can show them in a debug panel.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Number of lines kept by the global buffer
pub const DEFAULT_CAPACITY: usize = 200;

static GLOBAL_BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// Bounded buffer of formatted log lines. Oldest lines are dropped first.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Snapshot, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Layer that formats each event once and fans it out to the console and the buffer
pub struct ConsoleLayer {
    buffer: LogBuffer,
    timestamps: bool,
}

impl ConsoleLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer, timestamps: true }
    }

    /// Drop the wall-clock prefix (stable output for tests)
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = format_event(event, self.timestamps);
        write_console(*event.metadata().level(), &line);
        self.buffer.push(line);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push((field.name(), format!("{:?}", value)));
        }
    }
}

fn format_event(event: &Event<'_>, timestamps: bool) -> String {
    let meta = event.metadata();
    let mut visitor = FieldVisitor::default();
    event.record(&mut visitor);

    let mut line = String::new();
    if timestamps {
        let _ = write!(line, "{} ", chrono::Utc::now().format("%H:%M:%S%.3f"));
    }
    let _ = write!(line, "{:>5} {}: {}", meta.level(), meta.target(), visitor.message);
    for (name, value) in visitor.fields {
        let _ = write!(line, " {}={}", name, value);
    }
    line
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else if level == Level::INFO {
        web_sys::console::info_1(&value);
    } else {
        web_sys::console::debug_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Parse a level name ("info", "DEBUG", ...); unknown names fall back to INFO
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Install the global subscriber. Safe to call more than once: later calls
/// return the buffer installed by the first.
pub fn init(level: LevelFilter) -> LogBuffer {
    let buffer = GLOBAL_BUFFER
        .get_or_init(|| LogBuffer::new(DEFAULT_CAPACITY))
        .clone();

    let _ = tracing_subscriber::registry()
        .with(level)
        .with(ConsoleLayer::new(buffer.clone()))
        .try_init();

    buffer
}

/// Lines captured by the global subscriber, oldest first
pub fn recent_lines() -> Vec<String> {
    GLOBAL_BUFFER.get().map(LogBuffer::lines).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.lines(), vec!["line 2", "line 3", "line 4"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_buffer_zero_capacity_keeps_one() {
        let buffer = LogBuffer::new(0);
        buffer.push("a".into());
        buffer.push("b".into());
        assert_eq!(buffer.lines(), vec!["b"]);
    }

    #[test]
    fn test_layer_formats_message_and_fields() {
        let buffer = LogBuffer::new(10);
        let subscriber = tracing_subscriber::registry()
            .with(ConsoleLayer::new(buffer.clone()).without_timestamps());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(chart = "hot-100", status = 503, "chart fetch failed");
        });

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(" WARN"));
        assert!(lines[0].contains("chart fetch failed"));
        assert!(lines[0].contains("chart=hot-100"));
        assert!(lines[0].contains("status=503"));
    }

    #[test]
    fn test_level_filter_applies() {
        let buffer = LogBuffer::new(10);
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::WARN)
            .with(ConsoleLayer::new(buffer.clone()).without_timestamps());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("hidden");
            tracing::error!("shown");
        });

        assert_eq!(buffer.len(), 1);
        assert!(buffer.lines()[0].contains("shown"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN "), LevelFilter::WARN);
        assert_eq!(parse_level("nonsense"), LevelFilter::INFO);
    }
}
