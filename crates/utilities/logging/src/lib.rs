//! Logging setup shared by stackstat hosts and tests.
//!
//! Collectors only emit `tracing` events; installing a subscriber is left to whoever embeds
//! them. [`LogConfig`] describes that subscriber. Output always goes to stdout; collectors own
//! no log files.

mod tracing;
pub use self::tracing::{LogFormat, init_test_tracing};

use ::tracing::level_filters::LevelFilter;
use serde::{Deserialize, Serialize};

/// Stdout log output.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdoutLogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Configuration of the global tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level applied on top of the environment filter.
    pub global_level: LevelFilter,
    /// Stdout output. `None` keeps the filter but prints nothing.
    pub stdout_logs: Option<StdoutLogConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { global_level: LevelFilter::INFO, stdout_logs: Some(StdoutLogConfig::default()) }
    }
}

impl LogConfig {
    /// Builds a config from a verbosity level.
    ///
    /// `0` disables logging, `1` is errors only and `5` and above is trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let global_level = match verbosity {
            0 => LevelFilter::OFF,
            1 => LevelFilter::ERROR,
            2 => LevelFilter::WARN,
            3 => LevelFilter::INFO,
            4 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self { global_level, ..Default::default() }
    }
}
