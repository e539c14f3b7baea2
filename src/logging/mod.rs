// Logging - keeps tracing output off the terminal the renderer owns
//
// Anything written to stdout/stderr while a renderer is attached lands in
// the middle of the display. Log events therefore go to a file (when a log
// directory is configured) and to a bounded in-memory buffer that callers
// can turn into an atom of their own layout.

use crate::config::LoggingConfig;
use anyhow::{Context as _, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

const LOG_FILE_NAME: &str = "terminal-display.log";

/// A single log entry captured from tracing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = self.level.to_string();
        write!(f, "{:>5} {}", level, self.message)
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a log entry, dropping the oldest one when full
    pub fn add(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    /// The last `count` entries as one line each, ready to be an atom's content
    pub fn render_recent(&self, count: usize) -> String {
        self.recent(count)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tracing layer that copies events into a [`LogBuffer`]
pub struct CaptureLayer {
    buffer: LogBuffer,
}

impl CaptureLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        self.buffer.add(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
        });
    }
}

/// Visitor to extract the message from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Installed logging: keep it alive for as long as logs should flush
pub struct Logging {
    pub buffer: LogBuffer,
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails if a global subscriber
/// is already set.
pub fn init(config: &LoggingConfig) -> Result<Logging> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level {:?}", config.level))?;

    let buffer = LogBuffer::new();

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let (file_layer, file_guard) = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(CaptureLayer::new(buffer.clone()))
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(Logging {
        buffer,
        _file_guard: file_guard,
    })
}
