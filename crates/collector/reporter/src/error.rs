//! Reporter errors.

use crate::ConfigKey;
use stackstat_identity::IdentityError;
use std::error::Error;
use thiserror::Error;

/// A configuration node that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The key is not recognized.
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// The key is recognized but the node carries no value.
    #[error("no value for config key: {0}")]
    MissingValue(ConfigKey),
}

/// An error raised by a [`StatsSource`](crate::StatsSource) while fetching stats.
#[derive(Debug, Error)]
pub enum StatsError {
    /// No identity client could be built.
    #[error("identity client unavailable")]
    Identity(#[from] IdentityError),

    /// The service answered with a document that is not a stats tree.
    #[error("malformed stats document")]
    Decode(#[from] serde_json::Error),

    /// Source specific failure.
    #[error("{0}")]
    Source(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

/// Formats an error followed by its chain of sources, joined by `": "`.
pub(crate) fn report<E>(err: E) -> String
where
    E: Error + Send + Sync + 'static,
{
    format!("{:#}", eyre::Report::new(err))
}
