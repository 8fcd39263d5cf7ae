use crate::sdk::config::Credentials;
use crate::sdk::geometry::{translate, GeometryStrategy};
use crate::sdk::map::{LayerId, LineStyle, MapDisplay, MapError, RouteLayer};
use crate::sdk::routing::{RouteRequest, RouteResult, RoutingError, RoutingResponse};
use crate::sdk::selection::{RouteKey, Selection};

/// A dispatched request awaiting its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRoute {
    pub generation: u64,
    pub key: RouteKey,
    pub request: RouteRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutePhase {
    Idle,
    Processing,
    Ready,
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteUpdate {
    Applied,
    /// The response belonged to an outdated generation.
    Stale,
    Failed(String),
}

/// Stamps each dispatched request with a generation; responses from an older
/// generation are dropped untouched.
#[derive(Debug)]
pub struct RouteOrchestrator {
    credentials: Credentials,
    strategy: GeometryStrategy,
    style: LineStyle,
    generation: u64,
    last_key: Option<RouteKey>,
    phase: RoutePhase,
    result: Option<RouteResult>,
    layer: Option<LayerId>,
}

impl RouteOrchestrator {
    pub fn new(credentials: Credentials, strategy: GeometryStrategy) -> Self {
        Self {
            credentials,
            strategy,
            style: LineStyle::default(),
            generation: 0,
            last_key: None,
            phase: RoutePhase::Idle,
            result: None,
            layer: None,
        }
    }

    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    pub fn result(&self) -> Option<&RouteResult> {
        self.result.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn is_current(&self, pending: &PendingRoute) -> bool {
        pending.generation == self.generation
    }

    /// Returns a request when the selection is complete and differs from the
    /// one last dispatched.
    pub fn observe(&mut self, selection: &Selection) -> Option<PendingRoute> {
        let key = selection.route_key()?;
        if self.last_key == Some(key) {
            return None;
        }

        self.generation += 1;
        self.last_key = Some(key);
        self.result = None;
        self.phase = RoutePhase::Processing;
        log::info!(
            "Dispatching {} route request #{}",
            key.mode,
            self.generation
        );

        Some(PendingRoute {
            generation: self.generation,
            key,
            request: RouteRequest::new(&self.credentials, &key),
        })
    }

    pub fn complete(
        &mut self,
        map: &mut dyn MapDisplay,
        pending: PendingRoute,
        outcome: Result<RoutingResponse, RoutingError>,
    ) -> RouteUpdate {
        if !self.is_current(&pending) {
            log::debug!(
                "Dropping stale response #{} (current is #{})",
                pending.generation,
                self.generation
            );
            return RouteUpdate::Stale;
        }

        let strategy = self.strategy;
        let result = match outcome.and_then(|resp| RouteResult::from_response(&resp, strategy)) {
            Ok(result) => result,
            Err(e) => return self.fail(map, e.to_string()),
        };

        if let Err(e) = self.install(map, &result) {
            return self.fail(map, e.to_string());
        }

        log::info!(
            "Route #{} ready: {} segment(s), {:.0} s, {:.0} m",
            self.generation,
            result.segments.len(),
            result.total_duration_seconds,
            result.total_length_meters
        );
        self.result = Some(result);
        self.phase = RoutePhase::Ready;
        RouteUpdate::Applied
    }

    /// Forgets the current route and invalidates every in-flight request.
    pub fn reset(&mut self, map: &mut dyn MapDisplay) {
        self.generation += 1;
        self.last_key = None;
        self.result = None;
        self.phase = RoutePhase::Idle;
        self.teardown(map);
    }

    // Old layer goes first; the view is fitted only once the new one is ready.
    fn install(&mut self, map: &mut dyn MapDisplay, result: &RouteResult) -> Result<(), MapError> {
        self.teardown(map);
        if result.path.is_empty() {
            log::debug!("Route has no geometry, nothing to draw");
            return Ok(());
        }

        let geometry = translate(&result.path);
        let extent = geometry.extent;
        let id = map.add_route_layer(RouteLayer {
            geometry,
            style: self.style.clone(),
        })?;
        self.layer = Some(id);
        map.when_ready(id)?;
        if let Some(extent) = extent {
            map.fit_view_to(&extent);
        }
        log::debug!("Installed route layer {:?}", id);
        Ok(())
    }

    fn teardown(&mut self, map: &mut dyn MapDisplay) {
        if let Some(id) = self.layer.take() {
            map.remove_layer(id);
        }
    }

    fn fail(&mut self, map: &mut dyn MapDisplay, reason: String) -> RouteUpdate {
        log::warn!("Route #{} unavailable: {}", self.generation, reason);
        self.teardown(map);
        self.result = None;
        self.phase = RoutePhase::Unavailable(reason.clone());
        RouteUpdate::Failed(reason)
    }
}
