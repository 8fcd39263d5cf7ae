use super::error::RoutingError;
use super::request::RouteRequest;
use super::types::RoutingResponse;

pub trait RoutingService: Send + Sync {
    /// Issues exactly one call for `request`. No retries.
    fn fetch_route(&self, request: &RouteRequest) -> Result<RoutingResponse, RoutingError>;
}
