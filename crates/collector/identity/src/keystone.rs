//! [`KeystoneClient`]: the v2.0 password flow.

use crate::{Credentials, EndpointInterface, IdentityError, ServiceCatalog};
use reqwest::{StatusCode, blocking::Client};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// The tenant a token is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant id.
    pub id: String,
    /// Tenant name.
    pub name: String,
}

/// A token issued by Keystone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token id, sent as `X-Auth-Token`.
    pub id: String,
    /// Expiry timestamp, as returned.
    #[serde(default)]
    pub expires: Option<String>,
    /// Scope of the token.
    #[serde(default)]
    pub tenant: Option<Tenant>,
}

/// An authenticated Keystone v2.0 session.
///
/// Authentication happens in [`KeystoneClient::authenticate`]; a value of this type always
/// holds a token. Nothing is cached between clients.
#[derive(Debug, Clone)]
pub struct KeystoneClient {
    auth_url: Url,
    username: String,
    token: Token,
    catalog: ServiceCatalog,
}

impl KeystoneClient {
    /// Authenticates `credentials` with a fresh HTTP client.
    pub fn authenticate(credentials: &Credentials) -> Result<Self, IdentityError> {
        let http = Client::builder().build()?;
        Self::authenticate_with(&http, credentials)
    }

    /// Authenticates `credentials` using the given HTTP client.
    pub fn authenticate_with(
        http: &Client,
        credentials: &Credentials,
    ) -> Result<Self, IdentityError> {
        let auth_url = parse_auth_url(&credentials.auth_url)?;
        let tokens_url = tokens_url(&credentials.auth_url)?;
        debug!(
            target: "stackstat::identity",
            url = %tokens_url,
            user = %credentials.username,
            tenant = %credentials.tenant_name,
            "Requesting token"
        );

        let response = http.post(tokens_url).json(&TokenRequest::from(credentials)).send()?;
        let status = response.status();
        let body = response.text()?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::Unauthorized(credentials.username.clone()));
        }
        if !status.is_success() {
            return Err(IdentityError::Status { status: status.as_u16(), body });
        }

        let access = serde_json::from_str::<TokenResponse>(&body)?.access;
        debug!(
            target: "stackstat::identity",
            user = %credentials.username,
            services = access.service_catalog.services().len(),
            "Token issued"
        );

        Ok(Self {
            auth_url,
            username: credentials.username.clone(),
            token: access.token,
            catalog: access.service_catalog,
        })
    }

    /// Returns the identity endpoint this client authenticated against.
    pub const fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    /// Returns the authenticated user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the issued token.
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the token id, for use as `X-Auth-Token`.
    pub fn auth_token(&self) -> &str {
        &self.token.id
    }

    /// Returns the tenant the token is scoped to.
    pub const fn tenant(&self) -> Option<&Tenant> {
        self.token.tenant.as_ref()
    }

    /// Returns the service catalog issued with the token.
    pub const fn service_catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Returns the first catalog URL for `service_type` on `interface`, in any region.
    pub fn endpoint_url(&self, service_type: &str, interface: EndpointInterface) -> Option<&str> {
        self.catalog.url_for(service_type, interface, None)
    }
}

fn parse_auth_url(auth_url: &str) -> Result<Url, IdentityError> {
    Url::parse(auth_url)
        .map_err(|source| IdentityError::InvalidAuthUrl { url: auth_url.to_string(), source })
}

fn tokens_url(auth_url: &str) -> Result<Url, IdentityError> {
    parse_auth_url(&format!("{}/tokens", auth_url.trim_end_matches('/')))
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    auth: AuthRequest<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    tenant_name: &'a str,
    password_credentials: PasswordCredentials<'a>,
}

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> From<&'a Credentials> for TokenRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            auth: AuthRequest {
                tenant_name: &credentials.tenant_name,
                password_credentials: PasswordCredentials {
                    username: &credentials.username,
                    password: &credentials.password,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: Access,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Access {
    token: Token,
    #[serde(default)]
    service_catalog: ServiceCatalog,
}
