use super::{
    ClickEvent, Hit, HitTestOptions, LayerId, MapDisplay, MapError, MapPoint, MarkerKind,
    RouteLayer,
};
use crate::sdk::geometry::Extent;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A point feature of the reference layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFeature {
    pub layer_id: String,
    pub point: MapPoint,
    pub attributes: Map<String, Value>,
}

impl ReferenceFeature {
    pub fn named(layer_id: &str, point: MapPoint, attribute: &str, name: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert(attribute.to_string(), Value::String(name.to_string()));
        Self {
            layer_id: layer_id.to_string(),
            point,
            attributes,
        }
    }
}

/// Every mutating call the map received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    AddMarker(MarkerKind),
    ClearMarkers,
    AddLayer(LayerId),
    Ready(LayerId),
    RemoveLayer(LayerId),
    FitView(Extent),
}

/// In-memory map used by the command-line driver and the tests.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    features: Vec<ReferenceFeature>,
    tolerance: f64,
    markers: Vec<(MapPoint, MarkerKind)>,
    layers: BTreeMap<LayerId, RouteLayer>,
    next_layer: u64,
    calls: Vec<MapCall>,
    fail_next_layer: Option<String>,
}

impl HeadlessMap {
    /// `tolerance` is the hit-test radius in map units.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_feature(mut self, feature: ReferenceFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Makes the next `when_ready` call fail with `reason`.
    pub fn fail_next_layer(&mut self, reason: &str) {
        self.fail_next_layer = Some(reason.to_string());
    }

    pub fn markers(&self) -> &[(MapPoint, MarkerKind)] {
        &self.markers
    }

    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &RouteLayer)> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn calls(&self) -> &[MapCall] {
        &self.calls
    }

    pub fn fit_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MapCall::FitView(_)))
            .count()
    }
}

impl MapDisplay for HeadlessMap {
    fn hit_test(&self, event: &ClickEvent, options: &HitTestOptions) -> Result<Vec<Hit>, MapError> {
        let mut hits: Vec<(f64, &ReferenceFeature)> = self
            .features
            .iter()
            .filter(|f| options.include_layers.is_empty() || options.include_layers.contains(&f.layer_id))
            .map(|f| (f.point.distance_to(&event.map_point), f))
            .filter(|(distance, _)| *distance <= self.tolerance)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(hits
            .into_iter()
            .map(|(_, f)| Hit {
                layer_id: f.layer_id.clone(),
                attributes: f
                    .attributes
                    .iter()
                    .filter(|(k, _)| options.out_fields.is_empty() || options.out_fields.contains(*k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            })
            .collect())
    }

    fn add_marker(&mut self, at: MapPoint, kind: MarkerKind) {
        self.markers.push((at, kind));
        self.calls.push(MapCall::AddMarker(kind));
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.calls.push(MapCall::ClearMarkers);
    }

    fn add_route_layer(&mut self, layer: RouteLayer) -> Result<LayerId, MapError> {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        self.layers.insert(id, layer);
        self.calls.push(MapCall::AddLayer(id));
        Ok(id)
    }

    fn when_ready(&mut self, layer: LayerId) -> Result<(), MapError> {
        if let Some(reason) = self.fail_next_layer.take() {
            return Err(MapError::LayerFailed { layer, reason });
        }
        if !self.layers.contains_key(&layer) {
            return Err(MapError::LayerFailed {
                layer,
                reason: "layer is not on the map".to_string(),
            });
        }
        self.calls.push(MapCall::Ready(layer));
        Ok(())
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
        self.calls.push(MapCall::RemoveLayer(layer));
    }

    fn fit_view_to(&mut self, extent: &Extent) {
        self.calls.push(MapCall::FitView(*extent));
    }
}
