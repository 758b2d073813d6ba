//! Log sink that feeds the Log tab instead of the terminal

use log::{Level, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

const MAX_LINES: usize = 500;

/// Shared scroll-back buffer
pub type LogBuffer = Arc<Mutex<Vec<String>>>;

struct TuiLogger {
    buffer: LogBuffer,
    level: Level,
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut lines) = self.buffer.lock() {
            lines.push(format!("[{:5}] {}", record.level(), record.args()));
            if lines.len() > MAX_LINES {
                let excess = lines.len() - MAX_LINES;
                lines.drain(..excess);
            }
        }
    }

    fn flush(&self) {}
}

/// Install the logger and return the buffer it writes to
///
/// If another logger is already installed the returned buffer stays empty.
pub fn init(level: Level) -> LogBuffer {
    let buffer: LogBuffer = Arc::new(Mutex::new(Vec::new()));
    let logger = TuiLogger {
        buffer: Arc::clone(&buffer),
        level,
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
    buffer
}
