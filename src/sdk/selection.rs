use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and inside the latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A selected point plus the feature name resolved under the click, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPoint {
    pub point: GeoPoint,
    pub name: Option<String>,
}

impl NamedPoint {
    pub fn new(point: GeoPoint, name: Option<String>) -> Self {
        Self { point, name }
    }

    /// The resolved name, or the coordinates when nothing was hit.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.point.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Truck,
    Car,
}

impl TransportMode {
    /// Wire name understood by the routing service.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Truck => "truck",
            TransportMode::Car => "car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truck" => Ok(TransportMode::Truck),
            "car" => Ok(TransportMode::Car),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

/// Which end of the route a point was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Origin,
    Destination,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("origin and destination are already selected")]
    Full,

    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// The complete input of one routing request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteKey {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub mode: TransportMode,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    origin: Option<NamedPoint>,
    destination: Option<NamedPoint>,
    mode: TransportMode,
}

impl Selection {
    pub fn new(mode: TransportMode) -> Self {
        Self {
            origin: None,
            destination: None,
            mode,
        }
    }

    pub fn origin(&self) -> Option<&NamedPoint> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&NamedPoint> {
        self.destination.as_ref()
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// The slot the next accepted point will fill.
    pub fn next_slot(&self) -> Option<Slot> {
        match (&self.origin, &self.destination) {
            (None, _) => Some(Slot::Origin),
            (Some(_), None) => Some(Slot::Destination),
            (Some(_), Some(_)) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_slot().is_none()
    }

    /// Writes `point` into the first empty slot.
    pub fn push(&mut self, point: NamedPoint) -> Result<Slot, SelectionError> {
        if !point.point.is_valid() {
            return Err(SelectionError::InvalidCoordinate {
                latitude: point.point.latitude,
                longitude: point.point.longitude,
            });
        }
        let slot = self.next_slot().ok_or(SelectionError::Full)?;
        match slot {
            Slot::Origin => self.origin = Some(point),
            Slot::Destination => self.destination = Some(point),
        }
        Ok(slot)
    }

    /// Returns `true` when the mode actually changed.
    pub fn set_mode(&mut self, mode: TransportMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Drops both points. The mode is kept.
    pub fn clear(&mut self) {
        self.origin = None;
        self.destination = None;
    }

    /// `Some` only when both points are present.
    pub fn route_key(&self) -> Option<RouteKey> {
        match (&self.origin, &self.destination) {
            (Some(origin), Some(destination)) => Some(RouteKey {
                origin: origin.point,
                destination: destination.point,
                mode: self.mode,
            }),
            _ => None,
        }
    }
}
