//! [`Credentials`] for the Keystone password flow.

use derive_more::Constructor;
use std::fmt;

/// The four inputs needed to authenticate against Keystone.
///
/// There are no defaults: every field must be supplied by the caller.
#[derive(Clone, PartialEq, Eq, Constructor)]
pub struct Credentials {
    /// Keystone user name.
    pub username: String,
    /// Keystone password.
    pub password: String,
    /// Tenant (project) to scope the token to.
    pub tenant_name: String,
    /// Base URL of the v2.0 identity API, e.g. `http://keystone:5000/v2.0`.
    pub auth_url: String,
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tenant_name", &self.tenant_name)
            .field("auth_url", &self.auth_url)
            .finish()
    }
}
