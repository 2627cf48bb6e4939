//! Resolver configuration: target namespace and the global default bags.
//!
//! Read from TOML. Every key except `namespace` is optional.

use crate::definition::{AuthorizationMode, HeaderBindingConfiguration};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    pub namespace: String,
    /// Globally configured command validator, if any.
    #[serde(default)]
    pub validator_type: Option<String>,
    #[serde(default)]
    pub defaults: HostDefaults,
    #[serde(default)]
    pub authorization: AuthorizationDefaults,
}

/// Defaults applied to every definition that leaves them unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostDefaults {
    #[serde(default)]
    pub deserializer_type: Option<String>,
    #[serde(default)]
    pub header_binding: Option<HeaderBindingConfiguration>,
    #[serde(default)]
    pub response_handler_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDefaults {
    #[serde(default)]
    pub default_authorization: AuthorizationMode,
    #[serde(default)]
    pub claims_principal_authorization_type: Option<String>,
    #[serde(default)]
    pub header_name: Option<String>,
    #[serde(default)]
    pub token_validator_type: Option<String>,
}

impl ResolverConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }
}
