//! Identity-service client used by stackstat collectors to authenticate against the cloud
//! they poll.
//!
//! Only the Keystone v2.0 password flow is implemented. A [`KeystoneClient`] is built from
//! [`Credentials`], authenticates on construction, and exposes the issued token together with
//! the service catalog returned by Keystone.

mod credentials;
pub use credentials::Credentials;

mod error;
pub use error::IdentityError;

mod catalog;
pub use catalog::{CatalogEndpoint, CatalogService, EndpointInterface, ServiceCatalog};

mod keystone;
pub use keystone::{KeystoneClient, Tenant, Token};
