//! Metric samples and the sinks that receive them.
//!
//! A collector turns whatever it polled into [`MetricSample`]s and hands each one to a
//! [`MetricsSink`]. The host decides where samples end up; [`GaugeRecorder`] publishes
//! them through the [`metrics`] facade.

mod sample;
pub use sample::{MetricSample, ValueType};

mod sink;
pub use sink::{GaugeRecorder, MetricsSink, SinkError};

mod reporter;
pub use reporter::MetricsReporter;
