use crate::sdk::config::RoutingConfig;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::request::RouteRequest;
use crate::sdk::routing::service::RoutingService;
use crate::sdk::routing::types::RoutingResponse;
use crate::sdk::util::rate_limit::{routing_limiter, Limiter};
use reqwest::blocking::Client;

/// Calls the remote routing endpoint with a GET per request.
pub struct RemoteRoutingProvider {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl RemoteRoutingProvider {
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            limiter: routing_limiter(config.requests_per_minute),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RoutingService for RemoteRoutingProvider {
    fn fetch_route(&self, request: &RouteRequest) -> Result<RoutingResponse, RoutingError> {
        if self.limiter.check().is_err() {
            log::warn!("[PROVIDER] Routing quota exhausted, refusing request");
            return Err(RoutingError::RateLimited);
        }

        let url = request.url(&self.base_url)?;
        log::debug!(
            "[PROVIDER] Requesting {} route {:?} -> {:?}",
            request.transport_mode,
            request.origin,
            request.destination
        );

        let response = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send routing request to {}: {}", self.base_url, e);
                return Err(RoutingError::Request(e));
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Routing service returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(RoutingError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse RoutingResponse. Error: {}. Body: {}", e, text);
            RoutingError::Json(e)
        })
    }
}
