//! [`StatReporter`]: one fetch-then-dispatch cycle per polling tick.

use crate::{
    ConfigNode, LogSink, PollContext, ReporterConfig, Stats, StatsSource, TracingLog,
    error::report,
};
use stackstat_identity::{IdentityError, KeystoneClient};
use stackstat_metrics::{MetricSample, MetricsReporter, MetricsSink, SinkError};
use std::fmt;

/// Polls a [`StatsSource`] and forwards every value it returns to a [`MetricsSink`] as a
/// gauge.
///
/// The configuration is written by [`StatReporter::configure`] at startup and only read
/// afterwards. Each call to [`StatReporter::read`] runs a full cycle to completion; failures
/// are written to the [`LogSink`] and the cycle's data is dropped.
#[derive(Debug)]
pub struct StatReporter<S, M, L = TracingLog> {
    config: ReporterConfig,
    source: S,
    sink: M,
    log: L,
}

impl<S, M> StatReporter<S, M, TracingLog> {
    /// Creates a reporter that logs through [`tracing`].
    pub fn new(source: S, sink: M) -> Self {
        Self::with_log(source, sink, TracingLog)
    }
}

impl<S, M, L> StatReporter<S, M, L> {
    /// Creates a reporter with an explicit log sink.
    pub fn with_log(source: S, sink: M, log: L) -> Self {
        Self { config: ReporterConfig::default(), source, sink, log }
    }

    /// Returns the current configuration.
    pub const fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Returns the stats source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Returns the metrics sink.
    pub const fn sink(&self) -> &M {
        &self.sink
    }

    /// Returns the metrics sink mutably.
    pub const fn sink_mut(&mut self) -> &mut M {
        &mut self.sink
    }

    /// Returns the log sink.
    pub const fn log(&self) -> &L {
        &self.log
    }
}

impl<S, M, L> StatReporter<S, M, L>
where
    S: StatsSource,
    M: MetricsSink,
    L: LogSink,
{
    /// Applies the plugin's configuration block.
    ///
    /// Unknown keys and keys without a value are logged as warnings and skipped.
    pub fn configure(&mut self, nodes: &[ConfigNode]) {
        for node in nodes {
            if let Err(err) = self.config.apply(node) {
                self.log.warning(&format!("{}: {err}", self.config.prefix));
            }
        }
    }

    /// Authenticates a new identity client from the configured credentials.
    pub fn identity_client(&self) -> Result<KeystoneClient, IdentityError> {
        self.config.identity_client()
    }

    /// Runs one polling cycle: fetch the stats, then dispatch them.
    ///
    /// A fetch error is logged and ends the cycle without dispatching anything.
    pub fn read(&mut self) {
        let ctx = PollContext::new(&self.config, &self.log);
        let stats = match self.source.get_stats(&ctx) {
            Ok(stats) => stats,
            Err(err) => {
                let prefix = &self.config.prefix;
                self.log.error(&format!("{prefix}: failed to get stats :: {}", report(err)));
                return;
            }
        };
        self.dispatch(stats.as_ref());
    }

    /// Dispatches every fully nested value of `stats`.
    ///
    /// Absent or empty stats are logged as an error. The first sink failure is logged and the
    /// remaining values are dropped.
    pub fn dispatch(&mut self, stats: Option<&Stats>) {
        let Some(stats) = stats.filter(|stats| !stats.is_empty()) else {
            self.log.error(&format!("{}: failed to retrieve stats", self.config.prefix));
            return;
        };

        self.log_verbose(format_args!("dispatching {} new stats :: {stats}", stats.len()));
        for leaf in stats.leaves() {
            if let Err(err) = self.dispatch_value(
                leaf.plugin,
                leaf.plugin_instance,
                leaf.type_name,
                leaf.type_instance,
                leaf.value,
            ) {
                self.log.error(&format!(
                    "{}: failed to dispatch values :: {}",
                    self.config.prefix,
                    report(err)
                ));
                return;
            }
        }
    }

    /// Sends a single gauge with type label `"{type_name}-{type_instance}"` to the sink.
    pub fn dispatch_value(
        &mut self,
        plugin: &str,
        plugin_instance: &str,
        type_name: &str,
        type_instance: &str,
        value: f64,
    ) -> Result<(), SinkError> {
        self.log_verbose(format_args!(
            "dispatching value {plugin}.{plugin_instance}.{type_name}.{type_instance}={value}"
        ));
        let sample = MetricSample::gauge(plugin, plugin_instance, type_name, type_instance, value);
        self.sink.dispatch(&sample)
    }

    /// Writes an info line when verbose output is enabled.
    ///
    /// Same line as [`PollContext::log_verbose`].
    pub fn log_verbose(&self, message: impl fmt::Display) {
        PollContext::new(&self.config, &self.log).log_verbose(message);
    }
}

impl<S, M, L> MetricsReporter for StatReporter<S, M, L>
where
    S: StatsSource,
    M: MetricsSink,
    L: LogSink,
{
    fn report_metrics(&mut self) {
        self.read();
    }
}
