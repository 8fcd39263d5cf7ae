use super::error::RoutingError;
use crate::sdk::config::Credentials;
use crate::sdk::selection::{GeoPoint, RouteKey, TransportMode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Payload of one routing call. Field order is fixed, so equal inputs give
/// byte-identical encodings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub user: String,
    pub pass: String,
    pub resource: String,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub transport_mode: TransportMode,
}

impl RouteRequest {
    pub fn new(credentials: &Credentials, key: &RouteKey) -> Self {
        Self {
            user: credentials.user.clone(),
            pass: credentials.pass.clone(),
            resource: credentials.resource.clone(),
            origin: key.origin,
            destination: key.destination,
            transport_mode: key.mode,
        }
    }

    /// Base64 of the JSON payload.
    pub fn encode(&self) -> Result<String, RoutingError> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    /// `base_url` with the encoded payload appended as the last path segment.
    pub fn url(&self, base_url: &str) -> Result<String, RoutingError> {
        Ok(format!("{}/{}", base_url.trim_end_matches('/'), self.encode()?))
    }
}
