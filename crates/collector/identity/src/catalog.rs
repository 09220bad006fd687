//! The Keystone v2.0 service catalog.

use serde::{Deserialize, Serialize};

/// Which endpoint URL of a catalog entry to use.
///
/// Displays as the catalog field name and parses from either that name or the short form.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display,
)]
pub enum EndpointInterface {
    /// `publicURL`
    #[default]
    #[strum(to_string = "publicURL", serialize = "public")]
    Public,
    /// `internalURL`
    #[strum(to_string = "internalURL", serialize = "internal")]
    Internal,
    /// `adminURL`
    #[strum(to_string = "adminURL", serialize = "admin")]
    Admin,
}

/// One regional endpoint of a catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEndpoint {
    /// Region the endpoint serves.
    #[serde(default)]
    pub region: Option<String>,
    /// Public URL.
    #[serde(rename = "publicURL", default)]
    pub public_url: Option<String>,
    /// Internal URL.
    #[serde(rename = "internalURL", default)]
    pub internal_url: Option<String>,
    /// Admin URL.
    #[serde(rename = "adminURL", default)]
    pub admin_url: Option<String>,
}

impl CatalogEndpoint {
    /// Returns the URL for the given interface, if the catalog lists one.
    pub fn url(&self, interface: EndpointInterface) -> Option<&str> {
        match interface {
            EndpointInterface::Public => self.public_url.as_deref(),
            EndpointInterface::Internal => self.internal_url.as_deref(),
            EndpointInterface::Admin => self.admin_url.as_deref(),
        }
    }
}

/// A service registered in the catalog, e.g. `compute` served by `nova`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogService {
    /// Service type, e.g. `compute`, `image`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Service name, e.g. `nova`.
    #[serde(default)]
    pub name: String,
    /// Endpoints of the service.
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// The catalog returned with a token.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog(Vec<CatalogService>);

impl ServiceCatalog {
    /// Creates a catalog from its services.
    pub const fn new(services: Vec<CatalogService>) -> Self {
        Self(services)
    }

    /// Returns the services in catalog order.
    pub fn services(&self) -> &[CatalogService] {
        &self.0
    }

    /// Returns the first URL of `service_type` for `interface`.
    ///
    /// When `region` is given, only endpoints of that region are considered.
    pub fn url_for(
        &self,
        service_type: &str,
        interface: EndpointInterface,
        region: Option<&str>,
    ) -> Option<&str> {
        self.0
            .iter()
            .filter(|service| service.service_type == service_type)
            .flat_map(|service| service.endpoints.iter())
            .filter(|endpoint| region.is_none_or(|r| endpoint.region.as_deref() == Some(r)))
            .find_map(|endpoint| endpoint.url(interface))
    }
}
