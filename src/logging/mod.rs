//! Buffered `log` backend
//!
//! Keeps the most recent formatted lines in memory so an authoring UI can show
//! an activity panel (save status, rejected commands, import failures), and
//! optionally echoes them to stdout.

pub mod config;

pub use config::LogConfig;

use crate::config::error::ConfigError;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("logger already initialised: {0}")]
    AlreadySet(#[from] SetLoggerError),
}

pub struct FormLogger {
    buffer: Mutex<VecDeque<String>>,
    capacity: usize,
    echo_stdout: bool,
}

impl FormLogger {
    fn new(config: &LogConfig) -> Self {
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(config.buffer_capacity)),
            capacity: config.buffer_capacity.max(1),
            echo_stdout: config.echo_stdout,
        }
    }

    fn push(&self, line: String) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push_back(line);
            while buf.len() > self.capacity {
                buf.pop_front();
            }
        }
    }
}

static LOGGER: OnceCell<FormLogger> = OnceCell::new();

impl log::Log for FormLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format!("{} - {} - {}", record.level(), record.target(), record.args());
            if self.echo_stdout {
                println!("{}", msg);
            }
            self.push(msg);
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger as the global `log` backend.
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    config.validate()?;
    let level: LevelFilter = config.level_filter()?;
    let logger = LOGGER.get_or_init(|| FormLogger::new(config));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Snapshot of the buffered lines, oldest first.
pub fn recent_logs() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|l| l.buffer.lock().ok().map(|buf| buf.iter().cloned().collect()))
        .unwrap_or_default()
}
