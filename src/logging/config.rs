//! Configuration for the in-memory logger

use crate::config::error::{ConfigError, ConfigResult};
use crate::constants::DEFAULT_LOG_BUFFER;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

fn default_level() -> String {
    "info".to_string()
}

fn default_buffer_capacity() -> usize {
    DEFAULT_LOG_BUFFER
}

fn default_echo_stdout() -> bool {
    true
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Maximum level recorded (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    #[serde(default = "default_level")]
    pub level: String,
    /// Number of formatted lines kept for the activity panel
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// Also print every line to stdout
    #[serde(default = "default_echo_stdout")]
    pub echo_stdout: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            buffer_capacity: default_buffer_capacity(),
            echo_stdout: default_echo_stdout(),
        }
    }
}

impl LogConfig {
    /// Parse the configured level
    pub fn level_filter(&self) -> ConfigResult<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::validation(format!("unknown log level '{}'", self.level)))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.level_filter()?;
        if self.buffer_capacity == 0 {
            return Err(ConfigError::validation(
                "logging.buffer_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}
