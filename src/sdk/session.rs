use crate::sdk::click::{ClickInterpreter, ClickOutcome};
use crate::sdk::config::PickerConfig;
use crate::sdk::map::{ClickEvent, MapDisplay};
use crate::sdk::orchestrator::{PendingRoute, RouteOrchestrator, RoutePhase, RouteUpdate};
use crate::sdk::report::RouteReport;
use crate::sdk::routing::{RouteResult, RoutingError, RoutingResponse, RoutingService};
use crate::sdk::selection::{Selection, Slot, TransportMode};

/// How a due routing request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Fetch immediately, on the caller's thread.
    #[default]
    Inline,
    /// Queue the request; the host fetches and calls [`RoutePicker::complete`].
    Deferred,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteStatus {
    SelectingOrigin,
    SelectingDestination,
    Processing,
    Ready,
    Unavailable(String),
}

pub struct RoutePicker<M, S> {
    map: M,
    service: S,
    selection: Selection,
    clicks: ClickInterpreter,
    orchestrator: RouteOrchestrator,
    dispatch: Dispatch,
    pending: Vec<PendingRoute>,
    map_context: Option<String>,
}

impl<M: MapDisplay, S: RoutingService> RoutePicker<M, S> {
    pub fn new(map: M, service: S, config: &PickerConfig) -> Self {
        Self {
            map,
            service,
            selection: Selection::new(config.default_mode),
            clicks: ClickInterpreter::new(config.reference_layer.clone()),
            orchestrator: RouteOrchestrator::new(config.routing.credentials.clone(), config.geometry),
            dispatch: Dispatch::default(),
            pending: Vec::new(),
            map_context: None,
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn route(&self) -> Option<&RouteResult> {
        self.orchestrator.result()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn status(&self) -> RouteStatus {
        match self.selection.next_slot() {
            Some(Slot::Origin) => RouteStatus::SelectingOrigin,
            Some(Slot::Destination) => RouteStatus::SelectingDestination,
            None => match self.orchestrator.phase() {
                RoutePhase::Idle | RoutePhase::Processing => RouteStatus::Processing,
                RoutePhase::Ready => RouteStatus::Ready,
                RoutePhase::Unavailable(reason) => RouteStatus::Unavailable(reason.clone()),
            },
        }
    }

    pub fn report(&self) -> RouteReport {
        RouteReport::new(&self.selection, &self.status(), self.route())
    }

    pub fn on_map_click(&mut self, event: &ClickEvent) -> ClickOutcome {
        let outcome = self
            .clicks
            .on_map_click(&mut self.selection, &mut self.map, event);
        if let ClickOutcome::Accepted { .. } = outcome {
            self.trigger();
        }
        outcome
    }

    pub fn set_mode(&mut self, mode: TransportMode) {
        if self.selection.set_mode(mode) {
            log::debug!("Transport mode changed to {}", mode);
            self.trigger();
        }
    }

    /// Back to an empty selection with no markers and no route. Mode is kept.
    pub fn reset(&mut self) {
        self.map.clear_markers();
        self.selection.clear();
        self.orchestrator.reset(&mut self.map);
        self.pending.clear();
        log::info!("Route picker reset");
    }

    /// Records the active map's identifier; a change from a previously seen
    /// identifier resets the whole session. Returns `true` if it did.
    pub fn sync_map_context(&mut self, map_id: Option<&str>) -> bool {
        let changed = self.map_context.is_some() && self.map_context.as_deref() != map_id;
        if changed {
            log::info!(
                "Map context changed from {:?} to {:?}",
                self.map_context,
                map_id
            );
            self.reset();
        }
        self.map_context = map_id.map(str::to_string);
        changed
    }

    /// Requests queued under [`Dispatch::Deferred`], oldest first.
    pub fn take_pending(&mut self) -> Vec<PendingRoute> {
        std::mem::take(&mut self.pending)
    }

    pub fn complete(
        &mut self,
        pending: PendingRoute,
        outcome: Result<RoutingResponse, RoutingError>,
    ) -> RouteUpdate {
        self.orchestrator.complete(&mut self.map, pending, outcome)
    }

    fn trigger(&mut self) {
        let Some(pending) = self.orchestrator.observe(&self.selection) else {
            return;
        };
        match self.dispatch {
            Dispatch::Inline => {
                let outcome = self.service.fetch_route(&pending.request);
                self.orchestrator.complete(&mut self.map, pending, outcome);
            }
            Dispatch::Deferred => self.pending.push(pending),
        }
    }
}
