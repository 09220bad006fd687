/// Defines a contract for types that can report metrics.
/// This trait is intended to be implemented by collectors that are driven by an external
/// scheduler.
pub trait MetricsReporter {
    /// Reports metrics for the implementing type.
    /// This function is intended to be called once per polling interval. The implementation
    /// should gather the relevant values and report them to the configured sink. Failures are
    /// handled inside the call; nothing is returned to the scheduler.
    fn report_metrics(&mut self);
}

impl<R: MetricsReporter + ?Sized> MetricsReporter for Box<R> {
    fn report_metrics(&mut self) {
        (**self).report_metrics()
    }
}
