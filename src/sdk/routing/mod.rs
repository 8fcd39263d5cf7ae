pub mod error;
pub mod provider;
pub mod request;
pub mod route;
pub mod service;
pub mod types;

pub use error::RoutingError;
pub use provider::RemoteRoutingProvider;
pub use request::RouteRequest;
pub use route::{RouteResult, RouteSegment};
pub use service::RoutingService;
pub use types::RoutingResponse;
