//! [`MetricSample`] type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data source type of a sample's values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// An instantaneous value.
    #[default]
    Gauge,
}

impl ValueType {
    /// Returns the tag the host daemon uses for this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gauge => "gauge",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sample handed to a [`MetricsSink`](crate::MetricsSink).
///
/// Samples are built per polled value and dropped once the sink has accepted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Type tag of `values`.
    pub value_type: ValueType,
    /// The monitored subsystem, e.g. `nova`.
    pub plugin: String,
    /// Which instance of the subsystem the value belongs to.
    pub plugin_instance: String,
    /// Composite `type-type_instance` label.
    pub type_instance: String,
    /// The sample values. Gauges carry exactly one.
    pub values: Vec<f64>,
}

impl MetricSample {
    /// Builds a gauge sample. The type label is `"{type_name}-{type_instance}"`.
    pub fn gauge(
        plugin: impl Into<String>,
        plugin_instance: impl Into<String>,
        type_name: &str,
        type_instance: &str,
        value: f64,
    ) -> Self {
        Self {
            value_type: ValueType::Gauge,
            plugin: plugin.into(),
            plugin_instance: plugin_instance.into(),
            type_instance: format!("{type_name}-{type_instance}"),
            values: vec![value],
        }
    }
}

impl fmt::Display for MetricSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}-{} {:?}",
            self.plugin, self.plugin_instance, self.value_type, self.type_instance, self.values
        )
    }
}
