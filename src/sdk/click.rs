use crate::sdk::config::ReferenceLayer;
use crate::sdk::map::{ClickEvent, Hit, HitTestOptions, MapDisplay, MarkerKind};
use crate::sdk::selection::{NamedPoint, Selection, SelectionError, Slot};

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The point was written to `slot` and a marker placed.
    Accepted { slot: Slot, point: NamedPoint },
    /// Both points were already set.
    Ignored,
    /// The click did not project to a usable coordinate.
    Rejected(SelectionError),
}

#[derive(Debug, Clone)]
pub struct ClickInterpreter {
    layer: ReferenceLayer,
}

impl ClickInterpreter {
    pub fn new(layer: ReferenceLayer) -> Self {
        Self { layer }
    }

    fn hit_test_options(&self) -> HitTestOptions {
        HitTestOptions {
            include_layers: vec![self.layer.layer_id.clone()],
            out_fields: vec![self.layer.name_attribute.clone()],
        }
    }

    /// Name carried by the first hit, if it is a non-empty string.
    fn resolve_name(&self, hits: &[Hit]) -> Option<String> {
        hits.first()
            .and_then(|hit| hit.attributes.get(&self.layer.name_attribute))
            .and_then(|value| value.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    pub fn on_map_click(
        &self,
        selection: &mut Selection,
        map: &mut dyn MapDisplay,
        event: &ClickEvent,
    ) -> ClickOutcome {
        let Some(slot) = selection.next_slot() else {
            log::debug!("Click ignored: origin and destination already selected");
            return ClickOutcome::Ignored;
        };

        let point = map.project_to_geographic(event.map_point);
        if !point.is_valid() {
            log::debug!("Click rejected: {:?} projects outside the globe", event.map_point);
            return ClickOutcome::Rejected(SelectionError::InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }

        let hits = match map.hit_test(event, &self.hit_test_options()) {
            Ok(hits) => hits,
            Err(e) => {
                log::warn!("Hit-test failed, continuing without a name: {}", e);
                Vec::new()
            }
        };
        let named = NamedPoint::new(point, self.resolve_name(&hits));

        map.add_marker(event.map_point, MarkerKind::from(slot));
        match selection.push(named.clone()) {
            Ok(slot) => {
                log::debug!("Selected {:?}: {}", slot, named.label());
                ClickOutcome::Accepted { slot, point: named }
            }
            Err(e) => ClickOutcome::Rejected(e),
        }
    }
}
