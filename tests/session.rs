use proptest::prelude::*;
use route_picker::sdk::config::ReferenceLayer;
use route_picker::sdk::map::{MapCall, MarkerKind, ReferenceFeature};
use route_picker::sdk::routing::{RouteRequest, RoutingResponse};
use route_picker::*;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

// Helper: a routing service that replays canned answers and records requests
#[derive(Default)]
struct ScriptedService {
    answers: Mutex<VecDeque<Result<Value, u16>>>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl ScriptedService {
    fn answering(answers: Vec<Result<Value, u16>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::default(),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl RoutingService for ScriptedService {
    fn fetch_route(&self, request: &RouteRequest) -> Result<RoutingResponse, RoutingError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(serde_json::from_value(body)?),
            Some(Err(status)) => Err(RoutingError::Api {
                status,
                body: "unavailable".into(),
            }),
            None => Err(RoutingError::NoRoute),
        }
    }
}

fn one_section(mode: &str, duration: f64, length: f64) -> Value {
    json!({
        "message": { "routes": [{ "sections": [{
            "type": "vehicle",
            "transport": { "mode": mode },
            "summary": { "duration": duration, "length": length },
            "polyline": { "polyline": [[-34.60, -58.38], [-34.50, -58.50], [-34.40, -58.60]] }
        }]}]}
    })
}

fn parsed(body: Value) -> RoutingResponse {
    serde_json::from_value(body).unwrap()
}

const POINT_A: MapPoint = MapPoint { x: -6_498_000.0, y: -4_110_000.0 };
const POINT_B: MapPoint = MapPoint { x: -6_520_000.0, y: -4_090_000.0 };

fn zone_map() -> HeadlessMap {
    let layer = ReferenceLayer::default();
    HeadlessMap::new(250.0).with_feature(ReferenceFeature::named(
        &layer.layer_id,
        MapPoint::new(POINT_A.x + 10.0, POINT_A.y),
        &layer.name_attribute,
        "Zone1",
    ))
}

fn picker(service: ScriptedService) -> RoutePicker<HeadlessMap, ScriptedService> {
    RoutePicker::new(zone_map(), service, &PickerConfig::default())
}

#[test]
fn end_to_end_car_route() {
    let service = ScriptedService::answering(vec![
        Ok(one_section("truck", 2400.0, 15000.0)),
        Ok(one_section("car", 1800.0, 15000.0)),
    ]);
    let mut picker = picker(service);

    picker.on_map_click(&ClickEvent::at(POINT_A));
    assert_eq!(picker.status(), RouteStatus::SelectingDestination);
    picker.on_map_click(&ClickEvent::at(POINT_B));
    picker.set_mode(TransportMode::Car);

    assert_eq!(picker.selection().origin().unwrap().name.as_deref(), Some("Zone1"));
    assert_eq!(picker.selection().destination().unwrap().name, None);

    let route = picker.route().unwrap();
    assert_eq!(route.total_duration_seconds, 1800.0);
    assert_eq!(route.total_length_meters, 15000.0);
    assert_eq!(picker.status(), RouteStatus::Ready);

    let report = picker.report();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].mode, "Automóvil");
    assert_eq!(report.total_duration.as_deref(), Some("30 min"));

    assert_eq!(picker.map().layer_count(), 1);
    let (_, layer) = picker.map().layers().next().unwrap();
    assert_eq!(layer.geometry.coordinates()[0], vec![-58.38, -34.60]);

    let requests = picker.service().requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].transport_mode, TransportMode::Car);
}

#[test]
fn viewport_is_fitted_once_per_installed_route() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("car", 1800.0, 15000.0))]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    assert_eq!(picker.map().fit_count(), 1);

    let calls = picker.map().calls();
    let ready = calls.iter().position(|c| matches!(c, MapCall::Ready(_))).unwrap();
    let fit = calls.iter().position(|c| matches!(c, MapCall::FitView(_))).unwrap();
    assert!(ready < fit);
}

#[test]
fn redundant_clicks_are_ignored() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("truck", 60.0, 100.0))]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    let before = picker.selection().clone();

    assert_eq!(picker.on_map_click(&ClickEvent::at(MapPoint::new(1.0, 1.0))), ClickOutcome::Ignored);
    assert_eq!(picker.selection(), &before);
    assert_eq!(picker.map().markers().len(), 2);
    assert_eq!(picker.service().request_count(), 1);
}

#[test]
fn markers_distinguish_origin_and_destination() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("truck", 60.0, 100.0))]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    let kinds: Vec<_> = picker.map().markers().iter().map(|(_, k)| *k).collect();
    assert_eq!(kinds, [MarkerKind::Origin, MarkerKind::Destination]);
}

#[test]
fn reset_clears_everything_but_mode() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("car", 60.0, 100.0))]));
    picker.set_mode(TransportMode::Car);
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    assert!(picker.route().is_some());

    picker.reset();

    assert!(picker.selection().origin().is_none());
    assert!(picker.selection().destination().is_none());
    assert!(picker.route().is_none());
    assert!(picker.map().markers().is_empty());
    assert_eq!(picker.map().layer_count(), 0);
    assert_eq!(picker.selection().mode(), TransportMode::Car);
    assert_eq!(picker.status(), RouteStatus::SelectingOrigin);
}

#[test]
fn reset_on_empty_session_is_harmless() {
    let mut picker = picker(ScriptedService::default());
    picker.reset();
    picker.reset();
    assert_eq!(picker.status(), RouteStatus::SelectingOrigin);
    assert_eq!(picker.service().request_count(), 0);
}

#[test]
fn same_selection_is_routed_again_after_reset() {
    let mut picker = picker(ScriptedService::answering(vec![
        Ok(one_section("truck", 60.0, 100.0)),
        Ok(one_section("truck", 60.0, 100.0)),
    ]));
    for _ in 0..2 {
        picker.on_map_click(&ClickEvent::at(POINT_A));
        picker.on_map_click(&ClickEvent::at(POINT_B));
        assert_eq!(picker.status(), RouteStatus::Ready);
        picker.reset();
    }
    assert_eq!(picker.service().request_count(), 2);
}

#[test]
fn slow_first_response_cannot_overwrite_newer_route() {
    let mut picker = picker(ScriptedService::default()).with_dispatch(Dispatch::Deferred);
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    picker.set_mode(TransportMode::Car);

    let mut pending = picker.take_pending();
    assert_eq!(pending.len(), 2);
    let car = pending.pop().unwrap();
    let truck = pending.pop().unwrap();
    assert_eq!(picker.status(), RouteStatus::Processing);

    // Completion order is reversed: the newer request answers first.
    assert_eq!(
        picker.complete(car, Ok(parsed(one_section("car", 1800.0, 15000.0)))),
        RouteUpdate::Applied
    );
    assert_eq!(
        picker.complete(truck, Ok(parsed(one_section("truck", 9000.0, 15000.0)))),
        RouteUpdate::Stale
    );

    let route = picker.route().unwrap();
    assert_eq!(route.segments[0].mode, "car");
    assert_eq!(route.total_duration_seconds, 1800.0);
    assert_eq!(picker.map().layer_count(), 1);
}

#[test]
fn response_after_reset_is_dropped() {
    let mut picker = picker(ScriptedService::default()).with_dispatch(Dispatch::Deferred);
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    let pending = picker.take_pending().pop().unwrap();
    picker.reset();

    assert_eq!(
        picker.complete(pending, Ok(parsed(one_section("truck", 60.0, 100.0)))),
        RouteUpdate::Stale
    );
    assert!(picker.route().is_none());
    assert_eq!(picker.map().layer_count(), 0);
}

#[test]
fn fetch_failure_surfaces_as_unavailable() {
    let mut picker = picker(ScriptedService::answering(vec![Err(502)]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));

    match picker.status() {
        RouteStatus::Unavailable(reason) => assert!(reason.contains("502")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert!(picker.route().is_none());
    assert_ne!(picker.report().status, "Procesando…");
}

#[test]
fn mode_change_after_failure_retries() {
    let mut picker = picker(ScriptedService::answering(vec![
        Err(500),
        Ok(one_section("car", 600.0, 5000.0)),
    ]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    picker.set_mode(TransportMode::Car);
    assert_eq!(picker.status(), RouteStatus::Ready);
}

#[test]
fn setting_the_same_mode_does_not_refetch() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("truck", 60.0, 100.0))]));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));
    picker.set_mode(TransportMode::Truck);
    assert_eq!(picker.service().request_count(), 1);
}

#[test]
fn map_context_change_resets_session() {
    let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("truck", 60.0, 100.0))]));
    assert!(!picker.sync_map_context(Some("webmap-1")));
    picker.on_map_click(&ClickEvent::at(POINT_A));
    picker.on_map_click(&ClickEvent::at(POINT_B));

    assert!(!picker.sync_map_context(Some("webmap-1")));
    assert!(picker.route().is_some());

    assert!(picker.sync_map_context(Some("webmap-2")));
    assert!(picker.map().markers().is_empty());
    assert!(picker.selection().origin().is_none());
    assert!(picker.route().is_none());
    assert_eq!(picker.map().layer_count(), 0);
}

#[test]
fn first_context_only_records() {
    let mut picker = picker(ScriptedService::default());
    picker.on_map_click(&ClickEvent::at(POINT_A));
    assert!(!picker.sync_map_context(None));
    assert!(!picker.sync_map_context(Some("webmap-1")));
    assert!(picker.selection().origin().is_some());
}

proptest! {
    #[test]
    fn clicks_fill_origin_then_destination_then_stop(
        xs in proptest::collection::vec(-1.0e7f64..1.0e7, 1..8)
    ) {
        let mut picker = picker(ScriptedService::answering(vec![Ok(one_section("truck", 60.0, 100.0))]));
        let mut after_two = None;
        for (i, x) in xs.iter().enumerate() {
            picker.on_map_click(&ClickEvent::at(MapPoint::new(*x, 0.0)));
            match i {
                0 => {
                    prop_assert!(picker.selection().origin().is_some());
                    prop_assert!(picker.selection().destination().is_none());
                }
                1 => {
                    prop_assert!(picker.selection().is_complete());
                    after_two = Some(picker.selection().clone());
                }
                _ => prop_assert_eq!(Some(picker.selection()), after_two.as_ref()),
            }
        }
        prop_assert_eq!(picker.map().markers().len(), xs.len().min(2));
        prop_assert!(picker.service().request_count() <= 1);
    }
}
