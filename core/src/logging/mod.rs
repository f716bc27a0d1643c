//! Logging sinks shared by the supervisor watcher and the UI thread.
//!
//! A sink receives two kinds of writes: raw backend output bytes, forwarded
//! verbatim, and bonnet status lines, written as `[bonnet] <message>\n`.
//! Implementations serialize writes internally; callers never coordinate.

mod file;
mod sink;

use std::sync::Arc;

use crate::config::LoggingConfig;

pub use file::FileSink;
pub use sink::{DiscardSink, LogEntry, LogSink, MemorySink};

pub const BONNET_PREFIX: &str = "[bonnet] ";

pub type Logger = Arc<dyn LogSink>;

pub fn format_bonnet_line(message: &str) -> String {
    let mut line = String::with_capacity(BONNET_PREFIX.len() + message.len() + 1);
    line.push_str(BONNET_PREFIX);
    line.push_str(message);
    line.push('\n');
    line
}

/// Picks the sink for the given settings: discarding when logging is off,
/// file-backed otherwise.
pub fn open_sink(cfg: &LoggingConfig) -> std::io::Result<Logger> {
    if !cfg.enabled || cfg.file.trim().is_empty() {
        return Ok(Arc::new(DiscardSink));
    }
    Ok(Arc::new(FileSink::open(cfg.file.trim())?))
}
