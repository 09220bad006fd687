//! Sinks that accept [`MetricSample`]s.

use crate::{MetricSample, ValueType};
use metrics::{Label, gauge};
use thiserror::Error;
use tracing::trace;

/// An error returned by a [`MetricsSink`] that refused a sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The sample does not carry the number of values its type requires.
    #[error("{value_type} sample {name} carries {got} values, expected {expected}")]
    ValueCount {
        /// Type tag of the rejected sample.
        value_type: ValueType,
        /// `plugin/plugin_instance/type_instance` of the rejected sample.
        name: String,
        /// Values required by the type.
        expected: usize,
        /// Values actually present.
        got: usize,
    },

    /// The host rejected the sample.
    #[error("sample rejected by host: {0}")]
    Rejected(String),
}

/// Receives samples produced by a collector.
///
/// Dispatch is synchronous. A sink that blocks owns that blocking.
pub trait MetricsSink {
    /// Hands one sample to the host.
    fn dispatch(&mut self, sample: &MetricSample) -> Result<(), SinkError>;
}

impl<S: MetricsSink + ?Sized> MetricsSink for &mut S {
    fn dispatch(&mut self, sample: &MetricSample) -> Result<(), SinkError> {
        (**self).dispatch(sample)
    }
}

impl<S: MetricsSink + ?Sized> MetricsSink for Box<S> {
    fn dispatch(&mut self, sample: &MetricSample) -> Result<(), SinkError> {
        (**self).dispatch(sample)
    }
}

/// Collects samples in memory, in dispatch order.
impl MetricsSink for Vec<MetricSample> {
    fn dispatch(&mut self, sample: &MetricSample) -> Result<(), SinkError> {
        self.push(sample.clone());
        Ok(())
    }
}

/// Publishes gauge samples through the [`metrics`] facade.
///
/// The metric name is the sample's plugin, optionally prefixed with `{namespace}_`. The plugin
/// instance and composite type label become the `plugin_instance` and `type_instance` labels.
#[derive(Debug, Default, Clone)]
pub struct GaugeRecorder {
    namespace: Option<String>,
}

impl GaugeRecorder {
    /// Label carrying [`MetricSample::plugin_instance`].
    pub const PLUGIN_INSTANCE_LABEL: &'static str = "plugin_instance";

    /// Label carrying [`MetricSample::type_instance`].
    pub const TYPE_INSTANCE_LABEL: &'static str = "type_instance";

    /// Creates a recorder that uses the bare plugin name as metric name.
    pub const fn new() -> Self {
        Self { namespace: None }
    }

    /// Creates a recorder that prefixes every metric name with `{namespace}_`.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self { namespace: Some(namespace.into()) }
    }

    fn metric_name(&self, sample: &MetricSample) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}_{}", sample.plugin),
            None => sample.plugin.clone(),
        }
    }
}

impl MetricsSink for GaugeRecorder {
    fn dispatch(&mut self, sample: &MetricSample) -> Result<(), SinkError> {
        let [value] = sample.values.as_slice() else {
            return Err(SinkError::ValueCount {
                value_type: sample.value_type,
                name: format!(
                    "{}/{}/{}",
                    sample.plugin, sample.plugin_instance, sample.type_instance
                ),
                expected: 1,
                got: sample.values.len(),
            });
        };

        let name = self.metric_name(sample);
        trace!(target: "stackstat::metrics", %name, %sample, "Recording gauge");

        let labels = vec![
            Label::new(Self::PLUGIN_INSTANCE_LABEL, sample.plugin_instance.clone()),
            Label::new(Self::TYPE_INSTANCE_LABEL, sample.type_instance.clone()),
        ];
        gauge!(name, labels).set(*value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rstest::rstest;

    fn value_of(line: &str) -> f64 {
        line.rsplit(' ').next().and_then(|v| v.parse().ok()).expect("sample value")
    }

    fn render_with(recorder: &mut GaugeRecorder, samples: &[MetricSample]) -> String {
        let prometheus = PrometheusBuilder::new().build_recorder();
        let handle = prometheus.handle();
        metrics::with_local_recorder(&prometheus, || {
            for sample in samples {
                recorder.dispatch(sample).unwrap();
            }
        });
        handle.render()
    }

    #[test]
    fn test_gauge_recorder_sets_labelled_gauge() {
        let mut recorder = GaugeRecorder::new();
        let sample = MetricSample::gauge("nova", "instance1", "vcpus", "used", 4.0);
        let rendered = render_with(&mut recorder, &[sample]);

        let line = rendered
            .lines()
            .find(|line| line.starts_with("nova{"))
            .expect("nova gauge should be rendered");
        assert!(line.contains("plugin_instance=\"instance1\""));
        assert!(line.contains("type_instance=\"vcpus-used\""));
        assert_eq!(value_of(line), 4.0);
    }

    #[test]
    fn test_gauge_recorder_applies_namespace() {
        let mut recorder = GaugeRecorder::with_namespace("openstack");
        let sample = MetricSample::gauge("glance", "images", "count", "total", 12.0);
        let rendered = render_with(&mut recorder, &[sample]);

        assert!(rendered.lines().any(|line| line.starts_with("openstack_glance{")));
    }

    #[test]
    fn test_gauge_recorder_keeps_latest_value() {
        let mut recorder = GaugeRecorder::new();
        let rendered = render_with(
            &mut recorder,
            &[
                MetricSample::gauge("cinder", "volumes", "size", "used", 10.0),
                MetricSample::gauge("cinder", "volumes", "size", "used", 25.0),
            ],
        );

        let line = rendered.lines().find(|line| line.starts_with("cinder{")).unwrap();
        assert_eq!(value_of(line), 25.0);
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::two(vec![1.0, 2.0])]
    fn test_gauge_recorder_rejects_value_count(#[case] values: Vec<f64>) {
        let mut sample = MetricSample::gauge("nova", "instance1", "vcpus", "used", 0.0);
        sample.values = values.clone();

        let err = GaugeRecorder::new().dispatch(&sample).unwrap_err();
        assert_eq!(
            err,
            SinkError::ValueCount {
                value_type: ValueType::Gauge,
                name: "nova/instance1/vcpus-used".to_string(),
                expected: 1,
                got: values.len(),
            }
        );
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<MetricSample> = Vec::new();
        let first = MetricSample::gauge("nova", "a", "t", "x", 1.0);
        let second = MetricSample::gauge("nova", "b", "t", "x", 2.0);

        sink.dispatch(&first).unwrap();
        sink.dispatch(&second).unwrap();

        assert_eq!(sink, vec![first, second]);
    }
}
