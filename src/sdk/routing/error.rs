use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    // The service answered, but not with a success status
    #[error("API Error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to encode or parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No route found in success response")]
    NoRoute,

    #[error("Section {index} is malformed: {reason}")]
    InvalidSection { index: usize, reason: String },

    #[error("Routing request rate limit exceeded")]
    RateLimited,
}
