//! The [`StatsSource`] extension point.

use crate::{LogSink, ReporterConfig, Stats, StatsError};
use stackstat_identity::{IdentityError, KeystoneClient};
use std::fmt;

/// What a source can see while fetching stats.
#[derive(Clone, Copy)]
pub struct PollContext<'a> {
    config: &'a ReporterConfig,
    log: &'a dyn LogSink,
}

impl fmt::Debug for PollContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollContext").field("config", self.config).finish_non_exhaustive()
    }
}

impl<'a> PollContext<'a> {
    /// Creates a context over the reporter's configuration and log.
    pub const fn new(config: &'a ReporterConfig, log: &'a dyn LogSink) -> Self {
        Self { config, log }
    }

    /// Returns the reporter configuration.
    pub const fn config(&self) -> &'a ReporterConfig {
        self.config
    }

    /// Returns the reporter's log sink.
    pub const fn log(&self) -> &'a dyn LogSink {
        self.log
    }

    /// Authenticates a new identity client from the configured credentials.
    pub fn identity_client(&self) -> Result<KeystoneClient, IdentityError> {
        self.config.identity_client()
    }

    /// Writes an info line when verbose output is enabled.
    pub fn log_verbose(&self, message: impl fmt::Display) {
        if self.config.verbose {
            self.log.info(&format!("{}: {message}", self.config.prefix));
        }
    }
}

/// Produces the stats of one monitored service.
///
/// Implement this once per service. The provided `get_stats` only reports that no source
/// was supplied.
pub trait StatsSource {
    /// Fetches a fresh stats tree. `Ok(None)` means the service returned nothing.
    fn get_stats(&mut self, ctx: &PollContext<'_>) -> Result<Option<Stats>, StatsError> {
        ctx.log().error(&format!("{}: stats source not implemented", ctx.config().prefix));
        Ok(None)
    }
}

impl<S: StatsSource + ?Sized> StatsSource for &mut S {
    fn get_stats(&mut self, ctx: &PollContext<'_>) -> Result<Option<Stats>, StatsError> {
        (**self).get_stats(ctx)
    }
}

impl<S: StatsSource + ?Sized> StatsSource for Box<S> {
    fn get_stats(&mut self, ctx: &PollContext<'_>) -> Result<Option<Stats>, StatsError> {
        (**self).get_stats(ctx)
    }
}

/// A source that was never implemented.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedSource;

impl StatsSource for UnimplementedSource {}

/// A [`StatsSource`] backed by a closure. See [`from_fn`].
pub struct FnSource<F>(F);

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Wraps a closure into a [`StatsSource`].
pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(&PollContext<'_>) -> Result<Option<Stats>, StatsError>,
{
    FnSource(f)
}

impl<F> StatsSource for FnSource<F>
where
    F: FnMut(&PollContext<'_>) -> Result<Option<Stats>, StatsError>,
{
    fn get_stats(&mut self, ctx: &PollContext<'_>) -> Result<Option<Stats>, StatsError> {
        (self.0)(ctx)
    }
}
