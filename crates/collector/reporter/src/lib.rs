//! Base for collectors that poll a cloud API and report gauges.
//!
//! A [`StatReporter`] owns the plugin configuration, asks its [`StatsSource`] for a fresh
//! [`Stats`] tree on every polling tick and flattens the tree into gauge samples for a
//! [`MetricsSink`](stackstat_metrics::MetricsSink). Every failure inside a tick ends up as a
//! line on the reporter's [`LogSink`]; nothing is returned to the scheduler.

mod config;
pub use config::{ConfigKey, ConfigNode, ConfigValue, ReporterConfig};

mod error;
pub use error::{ConfigError, StatsError};

mod log;
pub use log::{LogSink, MemoryLog, Severity, TracingLog};

mod reporter;
pub use reporter::StatReporter;

mod source;
pub use source::{FnSource, PollContext, StatsSource, UnimplementedSource, from_fn};

mod stats;
pub use stats::{PluginInstances, StatLeaf, Stats, TypeInstances, Types};
