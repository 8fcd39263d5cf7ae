use super::error::RoutingError;
use super::types::RoutingResponse;
use crate::sdk::geometry::{select_path, GeometryStrategy};

/// One leg of a possibly multi-modal route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub mode: String,
    pub duration_seconds: f64,
    pub length_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// In travel order.
    pub segments: Vec<RouteSegment>,
    pub total_duration_seconds: f64,
    pub total_length_meters: f64,
    /// `[lat, lon]` vertices of the drawn line.
    pub path: Vec<[f64; 2]>,
}

impl RouteResult {
    /// Builds a result from the first route of a response.
    pub fn from_response(
        response: &RoutingResponse,
        strategy: GeometryStrategy,
    ) -> Result<Self, RoutingError> {
        let route = response.message.routes.first().ok_or(RoutingError::NoRoute)?;

        let mut segments = Vec::with_capacity(route.sections.len());
        for (index, section) in route.sections.iter().enumerate() {
            let summary = section.summary;
            for (field, value) in [("duration", summary.duration), ("length", summary.length)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RoutingError::InvalidSection {
                        index,
                        reason: format!("{field} is {value}"),
                    });
                }
            }
            segments.push(RouteSegment {
                mode: section.mode().unwrap_or("unknown").to_string(),
                duration_seconds: summary.duration,
                length_meters: summary.length,
            });
        }

        let polylines: Vec<Vec<[f64; 2]>> =
            route.sections.iter().map(|s| s.path().to_vec()).collect();

        Ok(Self {
            total_duration_seconds: segments.iter().map(|s| s.duration_seconds).sum(),
            total_length_meters: segments.iter().map(|s| s.length_meters).sum(),
            segments,
            path: select_path(&polylines, strategy),
        })
    }
}
