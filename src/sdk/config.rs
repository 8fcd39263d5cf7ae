use crate::sdk::geometry::GeometryStrategy;
use crate::sdk::selection::TransportMode;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/external_api_service";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Account fields embedded in every request payload. Placeholders by default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
    pub resource: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            user: String::new(),
            pass: String::new(),
            resource: "routes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub base_url: String,
    pub credentials: Credentials,
    /// `None` keeps the HTTP client's default.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
    pub requests_per_minute: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            timeout: None,
            requests_per_minute: 30,
        }
    }
}

impl RoutingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RoutingConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup("ROUTE_API_BASE") {
            config.base_url = base_url;
        }
        if let Some(user) = lookup("ROUTE_API_USER") {
            config.credentials.user = user;
        }
        if let Some(pass) = lookup("ROUTE_API_PASS") {
            config.credentials.pass = pass;
        }
        if let Some(resource) = lookup("ROUTE_API_RESOURCE") {
            config.credentials.resource = resource;
        }
        if let Some(value) = lookup("ROUTE_API_TIMEOUT_SECS") {
            let secs = parse_number::<u64>("ROUTE_API_TIMEOUT_SECS", &value)?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(value) = lookup("ROUTE_API_RATE_PER_MINUTE") {
            config.requests_per_minute = parse_number("ROUTE_API_RATE_PER_MINUTE", &value)?;
        }
        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}

mod optional_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

/// The layer hit-tested to name clicked points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceLayer {
    pub layer_id: String,
    pub name_attribute: String,
}

impl Default for ReferenceLayer {
    fn default() -> Self {
        Self {
            layer_id: "reference-units".to_string(),
            name_attribute: "DENOMINACI".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub routing: RoutingConfig,
    pub reference_layer: ReferenceLayer,
    pub geometry: GeometryStrategy,
    pub default_mode: TransportMode,
}
