pub mod headless;

pub use headless::{HeadlessMap, MapCall, ReferenceFeature};

use crate::sdk::geometry::{Extent, RouteGeometry};
use crate::sdk::selection::{GeoPoint, Slot};
use serde_json::{Map, Value};
use thiserror::Error;

/// Spherical Web-Mercator radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A position on screen, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// A position in the map's projected (Web-Mercator) space, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &MapPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub screen: ScreenPoint,
    pub map_point: MapPoint,
}

impl ClickEvent {
    pub fn at(map_point: MapPoint) -> Self {
        Self {
            screen: ScreenPoint::default(),
            map_point,
        }
    }
}

/// Restricts a hit-test to some layers and attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitTestOptions {
    pub include_layers: Vec<String>,
    pub out_fields: Vec<String>,
}

/// One feature found under a click.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub layer_id: String,
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Origin,
    Destination,
}

impl MarkerKind {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerKind::Origin => "green",
            MarkerKind::Destination => "red",
        }
    }
}

impl From<Slot> for MarkerKind {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Origin => MarkerKind::Origin,
            Slot::Destination => MarkerKind::Destination,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: [u8; 3],
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [0, 68, 136],
            width: 4.0,
        }
    }
}

/// A route line ready to be handed to the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayer {
    pub geometry: RouteGeometry,
    pub style: LineStyle,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("map rejected the layer: {0}")]
    LayerRejected(String),

    #[error("layer {layer:?} failed to load: {reason}")]
    LayerFailed { layer: LayerId, reason: String },

    #[error("hit-test failed: {0}")]
    HitTest(String),
}

pub trait MapDisplay {
    /// Converts a projected map point to latitude/longitude.
    fn project_to_geographic(&self, point: MapPoint) -> GeoPoint {
        web_mercator_to_geographic(point)
    }

    /// Features under the click, nearest first.
    fn hit_test(&self, event: &ClickEvent, options: &HitTestOptions) -> Result<Vec<Hit>, MapError>;

    fn add_marker(&mut self, at: MapPoint, kind: MarkerKind);

    fn clear_markers(&mut self);

    fn add_route_layer(&mut self, layer: RouteLayer) -> Result<LayerId, MapError>;

    /// Blocks until the layer can be drawn.
    fn when_ready(&mut self, layer: LayerId) -> Result<(), MapError>;

    fn remove_layer(&mut self, layer: LayerId);

    fn fit_view_to(&mut self, extent: &Extent);
}

pub fn web_mercator_to_geographic(point: MapPoint) -> GeoPoint {
    let mut longitude = (point.x / EARTH_RADIUS_M).to_degrees();
    // Clicks on a wrapped copy of the world; the antimeridian itself keeps its sign.
    if longitude.abs() > 180.0 + 1e-9 {
        longitude = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    }
    let latitude = (2.0 * (point.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2)
        .to_degrees();
    GeoPoint::new(latitude, longitude)
}

pub fn geographic_to_web_mercator(point: GeoPoint) -> MapPoint {
    let x = point.longitude.to_radians() * EARTH_RADIUS_M;
    let y = (std::f64::consts::FRAC_PI_4 + point.latitude.to_radians() / 2.0)
        .tan()
        .ln()
        * EARTH_RADIUS_M;
    MapPoint::new(x, y)
}
