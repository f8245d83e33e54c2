//! Console Logger
//!
//! A `tracing` layer for the browser: every event is formatted once, written
//! to the devtools console at the matching severity, and kept in a circular
//! buffer so recent history can be dumped on demand.

use std::collections::VecDeque;
use std::fmt::{Debug, Write};
use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Lines kept by [`init`]
pub const DEFAULT_CAPACITY: usize = 500;

/// Where formatted lines go besides the buffer
pub type Sink = fn(Level, &str);

/// Fixed-size ring of the most recent log lines
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self { lines: Mutex::new(VecDeque::with_capacity(capacity)), capacity: capacity.max(1) }
    }

    pub fn push(&self, line: String) {
        let Ok(mut lines) = self.lines.lock() else { return };
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
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

pub struct ConsoleLayer {
    buffer: Arc<LogBuffer>,
    sink: Sink,
}

impl ConsoleLayer {
    pub fn new(buffer: Arc<LogBuffer>, sink: Sink) -> Self {
        Self { buffer, sink }
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        let meta = event.metadata();
        let now = chrono::Local::now().time();
        let line = format_line(&now, *meta.level(), meta.target(), &fields.message, &fields.extra);

        (self.sink)(*meta.level(), &line);
        self.buffer.push(line);
    }
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    extra: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extra.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.extra.push((field.name().to_string(), format!("{:?}", value)));
        }
    }
}

/// `HH:MM:SS.mmm LEVEL target: message key=value ...`
pub fn format_line(time: &NaiveTime, level: Level, target: &str, message: &str, fields: &[(String, String)]) -> String {
    let mut line = format!("{} {:>5} {}: {}", time.format("%H:%M:%S%.3f"), level.as_str(), target, message);
    for (key, value) in fields {
        let _ = write!(line, " {}={}", key, value);
    }
    line
}

/// Level filter from a config string; unknown values mean `info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::INFO)
}

/// Devtools console on wasm, stderr elsewhere
#[cfg(target_arch = "wasm32")]
pub fn console_sink(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        Level::DEBUG => web_sys::console::log_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn console_sink(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global subscriber; returns the buffer it writes to.
///
/// Safe to call twice: the second install is ignored and gets a fresh,
/// unused buffer.
pub fn init(level: &str) -> Arc<LogBuffer> {
    let buffer = Arc::new(LogBuffer::new(DEFAULT_CAPACITY));
    let layer = ConsoleLayer::new(buffer.clone(), console_sink);
    let _ = tracing_subscriber::registry().with(parse_level(level)).with(layer).try_init();
    buffer
}
