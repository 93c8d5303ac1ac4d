//! Rolling Logger
//!
//! A `tracing-subscriber` layer that keeps the most recent log lines in a
//! circular buffer and forwards each line to the browser console (stderr on
//! native targets). `log` records are bridged through `tracing-log`, so
//! application code can keep using the `log` macros.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Logger settings
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Lines kept in the ring buffer
    pub capacity: usize,
    /// Minimum level recorded
    pub level: log::LevelFilter,
    /// Forward lines to the console/stderr
    pub console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            level: log::LevelFilter::Info,
            console: true,
        }
    }
}

/// One formatted log record
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Fixed-capacity buffer; the oldest line is dropped when full.
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<LogLine>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }
}

/// Shared buffer handle kept after initialization
#[derive(Clone)]
pub struct LoggerHandle {
    app_name: String,
    buffer: Arc<Mutex<RingBuffer>>,
}

impl LoggerHandle {
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buf) => buf.lines().map(ToString::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Layer that records every event into a [`RingBuffer`]
pub struct RollingLayer {
    buffer: Arc<Mutex<RingBuffer>>,
    console: bool,
}

impl RollingLayer {
    pub fn new(buffer: Arc<Mutex<RingBuffer>>) -> Self {
        Self { buffer, console: true }
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }
}

impl<S> Layer<S> for RollingLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let target = visitor.target.take().unwrap_or_else(|| meta.target().to_string());
        let line = LogLine {
            timestamp: Local::now(),
            level: *meta.level(),
            target,
            message: visitor.finish(),
        };

        if self.console {
            emit(&line);
        }
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push(line);
        }
    }
}

/// Collects the message plus `key=value` pairs of an event.
/// Bridged `log` records carry their original target in `log.target`.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
    target: Option<String>,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &LogLine) {
    let text = wasm_bindgen::JsValue::from_str(&line.to_string());
    match line.level {
        Level::ERROR => web_sys::console::error_1(&text),
        Level::WARN => web_sys::console::warn_1(&text),
        _ => web_sys::console::log_1(&text),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &LogLine) {
    eprintln!("{}", line);
}

/// Map a `log` threshold onto the tracing filter
pub fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Can only succeed once per process.
pub fn init_logger(app_name: &str, config: LoggerConfig) -> Result<LoggerHandle, LoggerError> {
    if HANDLE.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let buffer = Arc::new(Mutex::new(RingBuffer::new(config.capacity)));
    let layer = RollingLayer::new(buffer.clone())
        .with_console(config.console)
        .with_filter(level_filter(config.level));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    let handle = LoggerHandle {
        app_name: app_name.to_string(),
        buffer,
    };
    HANDLE
        .set(handle.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(app = %app_name, capacity = config.capacity, "logger initialized");
    Ok(handle)
}

/// Lines currently buffered by the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    HANDLE.get().map(LoggerHandle::recent_lines).unwrap_or_default()
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    let handle = HANDLE.get().ok_or(LoggerError::NotInitialized)?;
    tracing::info!(app = %handle.app_name, "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    let handle = HANDLE.get().ok_or(LoggerError::NotInitialized)?;
    tracing::error!(app = %handle.app_name, "{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(message: &str) -> LogLine {
        LogLine {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    fn capture<F: FnOnce()>(capacity: usize, level: log::LevelFilter, f: F) -> Vec<LogLine> {
        let buffer = Arc::new(Mutex::new(RingBuffer::new(capacity)));
        let layer = RollingLayer::new(buffer.clone())
            .with_console(false)
            .with_filter(level_filter(level));
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        let buf = buffer.lock().unwrap();
        buf.lines().cloned().collect()
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut buf = RingBuffer::new(2);
        buf.push(line("one"));
        buf.push(line("two"));
        buf.push(line("three"));

        let messages: Vec<_> = buf.lines().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buf = RingBuffer::new(0);
        buf.push(line("dropped"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_layer_records_message_and_fields() {
        let lines = capture(10, log::LevelFilter::Info, || {
            tracing::info!(task_id = 7, "moved task");
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].message, "moved task task_id=7");
        assert_eq!(lines[0].level, Level::INFO);
    }

    #[test]
    fn test_bridged_target_replaces_metadata_target() {
        let lines = capture(10, log::LevelFilter::Info, || {
            tracing::info!(log.target = "planboard::api", log.line = 12, "request sent");
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].target, "planboard::api");
        assert_eq!(lines[0].message, "request sent");
    }

    #[test]
    fn test_level_filter_drops_debug() {
        let lines = capture(10, log::LevelFilter::Info, || {
            tracing::debug!("noise");
            tracing::warn!("kept");
        });

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].message, "kept");
    }

    #[test]
    fn test_line_display_format() {
        let rendered = line("hello").to_string();
        assert!(rendered.ends_with(" INFO test: hello"), "got {rendered}");
    }

    #[test]
    fn test_helpers_require_init() {
        assert!(matches!(info("before init"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines().is_empty());
    }
}
