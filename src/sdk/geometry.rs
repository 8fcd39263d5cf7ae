use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde::Deserialize;

/// Which sections contribute to the drawn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryStrategy {
    /// Only the first section's polyline is drawn.
    #[default]
    FirstSection,
    /// All section polylines joined into a single line.
    AllSections,
}

/// Bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Extent {
    /// Extent of `[lat, lon]` pairs; `None` for an empty path.
    pub fn of_path(path: &[[f64; 2]]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let mut extent = Extent {
            min_lon: first[1],
            min_lat: first[0],
            max_lon: first[1],
            max_lat: first[0],
        };
        for [lat, lon] in rest {
            extent.min_lon = extent.min_lon.min(*lon);
            extent.min_lat = extent.min_lat.min(*lat);
            extent.max_lon = extent.max_lon.max(*lon);
            extent.max_lat = extent.max_lat.max(*lat);
        }
        Some(extent)
    }

    /// GeoJSON `bbox` order.
    pub fn to_bbox(&self) -> Vec<f64> {
        vec![self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

/// A one-feature collection holding the route line.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub collection: FeatureCollection,
    pub extent: Option<Extent>,
}

impl RouteGeometry {
    pub fn feature_count(&self) -> usize {
        self.collection.features.len()
    }

    /// The line's `[lon, lat]` positions.
    pub fn coordinates(&self) -> &[Vec<f64>] {
        self.collection
            .features
            .first()
            .and_then(|f| f.geometry.as_ref())
            .map(|g| match &g.value {
                Value::LineString(positions) => positions.as_slice(),
                _ => &[][..],
            })
            .unwrap_or(&[])
    }

    pub fn to_json_string(&self) -> String {
        GeoJson::from(self.collection.clone()).to_string()
    }
}

pub fn translate(raw: &[[f64; 2]]) -> RouteGeometry {
    let positions: Vec<Vec<f64>> = raw.iter().map(|[lat, lon]| vec![*lon, *lat]).collect();
    let extent = Extent::of_path(raw);

    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(positions))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    };

    RouteGeometry {
        collection: FeatureCollection {
            bbox: extent.map(|e| e.to_bbox()),
            features: vec![feature],
            foreign_members: None,
        },
        extent,
    }
}

/// Picks the path to draw out of the per-section polylines.
pub fn select_path(sections: &[Vec<[f64; 2]>], strategy: GeometryStrategy) -> Vec<[f64; 2]> {
    match strategy {
        GeometryStrategy::FirstSection => sections.first().cloned().unwrap_or_default(),
        GeometryStrategy::AllSections => {
            let mut path: Vec<[f64; 2]> = Vec::new();
            for section in sections {
                let skip = match (path.last(), section.first()) {
                    (Some(last), Some(first)) if last == first => 1,
                    _ => 0,
                };
                path.extend(section.iter().skip(skip));
            }
            path
        }
    }
}
