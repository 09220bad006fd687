//! Reporter configuration and the host's configuration nodes.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use stackstat_identity::{Credentials, IdentityError, KeystoneClient};
use std::{fmt, str::FromStr};

/// A single value of a configuration node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A quoted string.
    String(String),
    /// A number.
    Number(f64),
    /// A boolean.
    Boolean(bool),
}

impl ConfigValue {
    /// Returns the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A `key value...` entry of the plugin's configuration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    /// The key, matched case-sensitively.
    pub key: String,
    /// The values following the key. Only the first one is used.
    #[serde(default)]
    pub values: Vec<ConfigValue>,
}

impl ConfigNode {
    /// Creates a node with the given values.
    pub fn new(key: impl Into<String>, values: Vec<ConfigValue>) -> Self {
        Self { key: key.into(), values }
    }

    /// Creates a node with a single value.
    pub fn single(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self::new(key, vec![value.into()])
    }
}

/// Keys understood by [`ReporterConfig::apply`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum ConfigKey {
    /// Identity user name.
    Username,
    /// Identity password.
    Password,
    /// Tenant to scope the token to.
    TenantName,
    /// Identity API URL.
    #[strum(serialize = "AuthURL")]
    AuthUrl,
    /// Enables verbose tracing when set to `True` or `true`.
    Verbose,
    /// Prefix of every log line.
    Prefix,
}

/// Configuration of a [`StatReporter`](crate::StatReporter).
///
/// The identity fields have no defaults. They must all be configured before an identity
/// client can be built.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Identity user name.
    pub username: Option<String>,
    /// Identity password.
    pub password: Option<String>,
    /// Tenant name.
    pub tenant_name: Option<String>,
    /// Identity API URL.
    pub auth_url: Option<String>,
    /// Whether verbose messages are logged.
    pub verbose: bool,
    /// Prefix of every log line.
    pub prefix: String,
}

impl fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("tenant_name", &self.tenant_name)
            .field("auth_url", &self.auth_url)
            .field("verbose", &self.verbose)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl ReporterConfig {
    /// Applies one configuration node. Later nodes overwrite earlier ones.
    ///
    /// `Verbose` only ever switches verbose output on, and only for the strings `True` and
    /// `true`. Other string keys take the textual form of the first value.
    pub fn apply(&mut self, node: &ConfigNode) -> Result<(), ConfigError> {
        let key = ConfigKey::from_str(&node.key)
            .map_err(|_| ConfigError::UnknownKey(node.key.clone()))?;
        let value = node.values.first().ok_or(ConfigError::MissingValue(key))?;

        match key {
            ConfigKey::Username => self.username = Some(value.to_string()),
            ConfigKey::Password => self.password = Some(value.to_string()),
            ConfigKey::TenantName => self.tenant_name = Some(value.to_string()),
            ConfigKey::AuthUrl => self.auth_url = Some(value.to_string()),
            ConfigKey::Verbose => {
                if matches!(value.as_str(), Some("True" | "true")) {
                    self.verbose = true;
                }
            }
            ConfigKey::Prefix => self.prefix = value.to_string(),
        }
        Ok(())
    }

    /// Returns the identity credentials, failing on the first field that was never set.
    pub fn credentials(&self) -> Result<Credentials, IdentityError> {
        fn required(value: &Option<String>, key: ConfigKey) -> Result<String, IdentityError> {
            value.clone().ok_or_else(|| IdentityError::MissingCredential(key.into()))
        }

        Ok(Credentials::new(
            required(&self.username, ConfigKey::Username)?,
            required(&self.password, ConfigKey::Password)?,
            required(&self.tenant_name, ConfigKey::TenantName)?,
            required(&self.auth_url, ConfigKey::AuthUrl)?,
        ))
    }

    /// Authenticates a new identity client. Nothing is cached between calls.
    pub fn identity_client(&self) -> Result<KeystoneClient, IdentityError> {
        KeystoneClient::authenticate(&self.credentials()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn apply_all(nodes: &[ConfigNode]) -> (ReporterConfig, Vec<ConfigError>) {
        let mut config = ReporterConfig::default();
        let errors = nodes.iter().filter_map(|node| config.apply(node).err()).collect();
        (config, errors)
    }

    #[test]
    fn test_defaults_carry_no_credentials() {
        let config = ReporterConfig::default();
        assert_eq!(config.username, None);
        assert_eq!(config.password, None);
        assert_eq!(config.tenant_name, None);
        assert_eq!(config.auth_url, None);
        assert!(!config.verbose);
        assert_eq!(config.prefix, "");
    }

    #[test]
    fn test_recognized_keys() {
        let (config, errors) = apply_all(&[
            ConfigNode::single("Username", "admin"),
            ConfigNode::single("Password", "s3cret"),
            ConfigNode::single("TenantName", "ops"),
            ConfigNode::single("AuthURL", "http://keystone:5000/v2.0"),
            ConfigNode::single("Verbose", "true"),
            ConfigNode::single("Prefix", "openstack-nova"),
        ]);

        assert!(errors.is_empty());
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.password.as_deref(), Some("s3cret"));
        assert_eq!(config.tenant_name.as_deref(), Some("ops"));
        assert_eq!(config.auth_url.as_deref(), Some("http://keystone:5000/v2.0"));
        assert!(config.verbose);
        assert_eq!(config.prefix, "openstack-nova");
    }

    #[test]
    fn test_last_write_wins() {
        let (config, _) = apply_all(&[
            ConfigNode::single("Username", "first"),
            ConfigNode::single("Prefix", "a"),
            ConfigNode::single("Username", "second"),
            ConfigNode::single("Prefix", "b"),
        ]);
        assert_eq!(config.username.as_deref(), Some("second"));
        assert_eq!(config.prefix, "b");
    }

    #[test]
    fn test_unknown_key_changes_nothing() {
        let (config, errors) = apply_all(&[
            ConfigNode::single("Username", "admin"),
            ConfigNode::single("Region", "RegionOne"),
            ConfigNode::single("username", "lowercase"),
        ]);

        assert_eq!(
            errors,
            vec![
                ConfigError::UnknownKey("Region".to_string()),
                ConfigError::UnknownKey("username".to_string()),
            ]
        );
        assert_eq!(config.username.as_deref(), Some("admin"));
    }

    #[rstest]
    #[case::title_case("True".into(), true)]
    #[case::lower_case("true".into(), true)]
    #[case::upper_case("TRUE".into(), false)]
    #[case::yes("yes".into(), false)]
    #[case::one("1".into(), false)]
    #[case::false_string("false".into(), false)]
    #[case::boolean(ConfigValue::Boolean(true), false)]
    #[case::number(ConfigValue::Number(1.0), false)]
    fn test_verbose_literals(#[case] value: ConfigValue, #[case] expected: bool) {
        let (config, errors) = apply_all(&[ConfigNode::single("Verbose", value)]);
        assert!(errors.is_empty());
        assert_eq!(config.verbose, expected);
    }

    #[test]
    fn test_verbose_is_never_cleared() {
        let (config, _) = apply_all(&[
            ConfigNode::single("Verbose", "true"),
            ConfigNode::single("Verbose", "false"),
        ]);
        assert!(config.verbose);
    }

    #[test]
    fn test_node_without_value() {
        let (config, errors) = apply_all(&[ConfigNode::new("Username", vec![])]);
        assert_eq!(errors, vec![ConfigError::MissingValue(ConfigKey::Username)]);
        assert_eq!(config.username, None);
    }

    #[test]
    fn test_first_value_is_used_and_numbers_are_stringified() {
        let (config, _) = apply_all(&[
            ConfigNode::new("TenantName", vec!["ops".into(), "ignored".into()]),
            ConfigNode::single("Password", 123456.0),
        ]);
        assert_eq!(config.tenant_name.as_deref(), Some("ops"));
        assert_eq!(config.password.as_deref(), Some("123456"));
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in ConfigKey::iter() {
            assert_eq!(key.to_string().parse::<ConfigKey>(), Ok(key));
        }
        assert_eq!(ConfigKey::AuthUrl.to_string(), "AuthURL");
    }

    #[test]
    fn test_credentials_require_every_field() {
        let (config, _) = apply_all(&[
            ConfigNode::single("Username", "admin"),
            ConfigNode::single("Password", "s3cret"),
            ConfigNode::single("AuthURL", "http://keystone:5000/v2.0"),
        ]);
        let err = config.credentials().unwrap_err();
        assert!(matches!(err, IdentityError::MissingCredential("TenantName")));
        assert!(matches!(
            config.identity_client().unwrap_err(),
            IdentityError::MissingCredential("TenantName")
        ));
    }

    #[test]
    fn test_credentials_from_config() {
        let (config, _) = apply_all(&[
            ConfigNode::single("Username", "admin"),
            ConfigNode::single("Password", "s3cret"),
            ConfigNode::single("TenantName", "ops"),
            ConfigNode::single("AuthURL", "http://keystone:5000/v2.0"),
        ]);
        let creds = config.credentials().unwrap();
        assert_eq!(
            creds,
            Credentials::new(
                "admin".to_string(),
                "s3cret".to_string(),
                "ops".to_string(),
                "http://keystone:5000/v2.0".to_string(),
            )
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let (config, _) = apply_all(&[ConfigNode::single("Password", "s3cret")]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_nodes_from_toml() {
        #[derive(Deserialize)]
        struct Block {
            node: Vec<ConfigNode>,
        }

        let block: Block = toml::from_str(
            r#"
            [[node]]
            key = "Username"
            values = ["admin"]

            [[node]]
            key = "Verbose"
            values = ["True"]

            [[node]]
            key = "Interval"
            values = [10.0]
            "#,
        )
        .unwrap();

        let (config, errors) = apply_all(&block.node);
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert!(config.verbose);
        assert_eq!(errors, vec![ConfigError::UnknownKey("Interval".to_string())]);
    }
}
