//! Subscriber construction on top of [tracing_subscriber].

use ::tracing::{Subscriber, level_filters::LevelFilter};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    EnvFilter, Layer,
    prelude::__tracing_subscriber_SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::LogConfig;

/// The format of stdout log lines.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Full format (default).
    #[default]
    Full,
    /// One JSON object per line.
    Json,
    /// Multi-line, human oriented.
    Pretty,
    /// Single line, abbreviated.
    Compact,
}

impl LogConfig {
    /// Builds the subscriber described by this config without installing it.
    ///
    /// `env_filter` defaults to `RUST_LOG`; `global_level` is added on top of it.
    pub fn subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> impl Subscriber + Send + Sync + 'static {
        let stdout_layer = self.stdout_logs.as_ref().map(|stdout| match stdout.format {
            LogFormat::Full => tracing_subscriber::fmt::layer().boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
            LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        });

        let env_filter = env_filter
            .unwrap_or_else(EnvFilter::from_default_env)
            .add_directive(self.global_level.into());

        tracing_subscriber::registry().with(env_filter).with(stdout_layer)
    }

    /// Installs the subscriber as the global default.
    ///
    /// Fails if a global subscriber is already set.
    pub fn init_tracing_subscriber(
        &self,
        env_filter: Option<EnvFilter>,
    ) -> Result<(), TryInitError> {
        self.subscriber(env_filter).try_init()
    }
}

/// Installs a trace-level stdout subscriber for tests.
///
/// Safe to call from every test: once a global subscriber exists, later calls do nothing.
pub fn init_test_tracing() {
    let config = LogConfig { global_level: LevelFilter::TRACE, ..Default::default() };
    let _ = config.init_tracing_subscriber(None);
}
