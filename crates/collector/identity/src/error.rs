//! [`KeystoneClient`](crate::KeystoneClient) errors.

use thiserror::Error;

/// Errors raised while building an identity client.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A credential was never configured.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    /// The configured auth URL cannot be parsed.
    #[error("invalid auth url: {url}")]
    InvalidAuthUrl {
        /// The URL as configured.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("identity request failed")]
    Transport(#[from] reqwest::Error),

    /// Keystone rejected the credentials.
    #[error("identity service rejected the credentials for user {0}")]
    Unauthorized(String),

    /// Keystone answered with an unexpected status.
    #[error("identity service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body is not a v2.0 access document.
    #[error("malformed identity response")]
    Decode(#[from] serde_json::Error),
}
