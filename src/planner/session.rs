//! The route planner: waypoint list, language, route bookkeeping.
//!
//! [`RoutePlanner`] is the single owner of session state. Every mutation goes
//! through its methods, which keep markers on the map in step with the list,
//! re-encode the shareable query and queue [`PlannerEvent`]s for the UI.

use super::waypoints::{Waypoint, WaypointList};
use super::{PlannerError, PlannerEvent};
use crate::data::{LandmarkCatalog, LandmarkId};
use crate::geo::LatLng;
use crate::i18n::Language;
use crate::map::{
    GeoPosition, GeocodeCandidate, MapAdapter, MarkerHandle, MarkerStyle, RouteRequest,
    RouteSummary, RouteToken, RoutingError, SearchToken, TravelMode,
};
use crate::state::url_state;

/// Startup options for a planner session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlannerOptions {
    pub language: Language,
    pub travel_mode: TravelMode,
    /// Recompute the route after every mutation that leaves 2+ resolved points.
    pub auto_route: bool,
}

/// Session state for one planning session.
pub struct RoutePlanner<M: MapAdapter> {
    pub(super) map: M,
    pub(super) catalog: LandmarkCatalog,
    pub(super) language: Language,
    pub(super) travel_mode: TravelMode,
    pub(super) auto_route: bool,
    pub(super) waypoints: WaypointList,
    route_summary: Option<RouteSummary>,
    next_route_token: u64,
    pending_route: Option<RouteToken>,
    /// Points of the latest route request; the summary describes these.
    routed_coordinates: Vec<LatLng>,
    pub(super) next_search_token: u64,
    pub(super) pending_search: Option<(SearchToken, Option<usize>)>,
    pub(super) search_results: Vec<GeocodeCandidate>,
    pub(super) user_position: Option<GeoPosition>,
    pub(super) user_marker: Option<MarkerHandle>,
    landmark_markers: Vec<(LandmarkId, MarkerHandle)>,
    last_query: String,
    events: Vec<PlannerEvent>,
}

impl<M: MapAdapter> RoutePlanner<M> {
    /// Start a session: two empty slots and one marker per landmark.
    pub fn new(mut map: M, catalog: LandmarkCatalog, options: PlannerOptions) -> Self {
        let landmark_markers = catalog
            .iter()
            .map(|l| (l.id, map.place_marker(l.coordinates, MarkerStyle::Landmark)))
            .collect();

        let waypoints = WaypointList::new();
        let last_query = url_state::encode(options.language, []);

        Self {
            map,
            catalog,
            language: options.language,
            travel_mode: options.travel_mode,
            auto_route: options.auto_route,
            waypoints,
            route_summary: None,
            next_route_token: 0,
            pending_route: None,
            routed_coordinates: Vec::new(),
            next_search_token: 0,
            pending_search: None,
            search_results: Vec::new(),
            user_position: None,
            user_marker: None,
            landmark_markers,
            last_query,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        self.waypoints.as_slice()
    }

    pub fn route_summary(&self) -> Option<&RouteSummary> {
        self.route_summary.as_ref()
    }

    /// True while a route request is in flight.
    pub fn is_route_pending(&self) -> bool {
        self.pending_route.is_some()
    }

    pub fn catalog(&self) -> &LandmarkCatalog {
        &self.catalog
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn auto_route(&self) -> bool {
        self.auto_route
    }

    /// Current shareable query string.
    pub fn session_query(&self) -> &str {
        &self.last_query
    }

    /// Landmark whose catalog marker is `handle`.
    pub fn landmark_for_marker(&self, handle: MarkerHandle) -> Option<LandmarkId> {
        self.landmark_markers
            .iter()
            .find(|(_, m)| *m == handle)
            .map(|(id, _)| *id)
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PlannerEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn emit(&mut self, event: PlannerEvent) {
        self.events.push(event);
    }

    pub(super) fn notice(&mut self, error: PlannerError) {
        log::warn!("{}", error);
        self.events.push(PlannerEvent::Notice(error));
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_travel_mode(&mut self, mode: TravelMode) {
        if self.travel_mode != mode {
            self.travel_mode = mode;
            if self.auto_route && self.waypoints.resolved_count() >= 2 {
                let _ = self.compute_route();
            }
        }
    }

    pub fn set_auto_route(&mut self, enabled: bool) {
        self.auto_route = enabled;
    }

    // ------------------------------------------------------------------
    // Waypoint list operations
    // ------------------------------------------------------------------

    /// Fill a slot with a point and place its marker.
    ///
    /// Slot choice follows [`WaypointList::resolve_slot`]. A `landmark_id`
    /// that is unknown or does not sit at `coordinates` is dropped, so a
    /// bound waypoint always carries its landmark's coordinates.
    /// Returns the index of the filled slot.
    pub fn set_point(
        &mut self,
        display_name: impl Into<String>,
        coordinates: LatLng,
        landmark_id: Option<LandmarkId>,
        target_slot: Option<usize>,
        prepend: bool,
    ) -> usize {
        let index = self.fill_slot(
            display_name.into(),
            coordinates,
            landmark_id,
            target_slot,
            prepend,
        );
        self.after_mutation();
        index
    }

    /// [`Self::set_point`] without the resync, for batched fills.
    pub(super) fn fill_slot(
        &mut self,
        display_name: String,
        coordinates: LatLng,
        landmark_id: Option<LandmarkId>,
        target_slot: Option<usize>,
        prepend: bool,
    ) -> usize {
        let landmark_id = landmark_id.filter(|id| {
            let bound = self
                .catalog
                .get(*id)
                .is_some_and(|l| l.coordinates == coordinates);
            if !bound {
                log::warn!("Dropping landmark binding {:?}: coordinates differ", id);
            }
            bound
        });

        let index = self.waypoints.resolve_slot(target_slot, prepend);
        let stale = self
            .waypoints
            .get_mut(index)
            .and_then(|w| w.marker.take());
        if let Some(marker) = stale {
            self.map.remove_marker(marker);
        }

        let marker = self.map.place_marker(coordinates, MarkerStyle::Waypoint);
        if let Some(waypoint) = self.waypoints.get_mut(index) {
            waypoint.display_name = display_name;
            waypoint.coordinates = Some(coordinates);
            waypoint.landmark_id = landmark_id;
            waypoint.marker = Some(marker);
        }

        log::debug!("Waypoint {} set to {:?}", index, coordinates);
        index
    }

    /// Insert an empty stop after `index`. Returns the new slot's index.
    pub fn add_slot_after(&mut self, index: usize) -> usize {
        let at = self.waypoints.add_slot_after(index);
        self.emit(PlannerEvent::WaypointsChanged);
        self.sync_session();
        at
    }

    /// Remove an interior row, or clear the start/end row.
    pub fn remove_slot(&mut self, index: usize) {
        match self.waypoints.remove_slot(index) {
            Some(marker) => {
                if let Some(marker) = marker {
                    self.map.remove_marker(marker);
                }
                self.after_mutation();
            }
            None => log::warn!("remove_slot: index {} out of range", index),
        }
    }

    /// Empty a row's point without removing the row.
    pub fn clear_slot(&mut self, index: usize) {
        if let Some(marker) = self.waypoints.clear_slot(index) {
            if let Some(marker) = marker {
                self.map.remove_marker(marker);
            }
            self.after_mutation();
        }
    }

    /// Move a waypoint to a new position.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        if self.waypoints.reorder(from, to) {
            self.after_mutation();
        } else {
            log::warn!("reorder: {} -> {} out of range", from, to);
        }
    }

    /// Reset to two empty slots and drop the route.
    pub fn clear(&mut self) {
        for marker in self.waypoints.clear() {
            self.map.remove_marker(marker);
        }
        self.pending_search = None;
        self.search_results.clear();
        self.invalidate_route();
        self.emit(PlannerEvent::WaypointsChanged);
        self.sync_session();
        log::info!("Route cleared");
    }

    // ------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------

    /// Request a route through all resolved waypoints in order.
    ///
    /// With fewer than two resolved points no request is made and an
    /// [`PlannerError::InsufficientWaypoints`] notice is queued. The route
    /// arrives later through [`Self::on_route_result`].
    pub fn compute_route(&mut self) -> Result<RouteToken, PlannerError> {
        let coordinates = self.waypoints.resolved_coordinates();
        if coordinates.len() < 2 {
            self.notice(PlannerError::InsufficientWaypoints);
            return Err(PlannerError::InsufficientWaypoints);
        }

        self.next_route_token += 1;
        let token = RouteToken(self.next_route_token);
        self.pending_route = Some(token);
        self.routed_coordinates = coordinates.clone();

        log::info!(
            "Requesting {:?} route through {} points",
            self.travel_mode,
            coordinates.len()
        );
        self.map.request_route(RouteRequest {
            token,
            coordinates,
            language: self.language,
            mode: self.travel_mode,
        });
        Ok(token)
    }

    /// Apply a routing result. Results for superseded tokens are dropped.
    pub fn on_route_result(&mut self, token: RouteToken, result: Result<RouteSummary, RoutingError>) {
        if self.pending_route != Some(token) {
            log::debug!("Discarding stale route result {:?}", token);
            return;
        }
        self.pending_route = None;

        match result {
            Ok(summary) => {
                log::info!(
                    "Route: {:.0} m, {:.0} s, {} vertices",
                    summary.distance_m,
                    summary.duration_s,
                    summary.geometry.len()
                );
                self.map.show_route(&summary.geometry);
                self.route_summary = Some(summary);
                self.emit(PlannerEvent::RouteSummaryUpdated);
            }
            Err(e) => {
                self.drop_summary();
                self.notice(e.into());
            }
        }
    }

    /// Forget any pending request and discard the current summary.
    fn invalidate_route(&mut self) {
        self.pending_route = None;
        self.routed_coordinates.clear();
        self.drop_summary();
    }

    fn drop_summary(&mut self) {
        if self.route_summary.take().is_some() {
            self.map.clear_route();
            self.emit(PlannerEvent::RouteCleared);
        }
    }

    // ------------------------------------------------------------------
    // Language and session
    // ------------------------------------------------------------------

    /// Switch the UI language and re-label landmark-bound waypoints.
    ///
    /// Free-text names are left as typed.
    pub fn switch_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }
        self.language = language;

        let catalog = &self.catalog;
        for waypoint in self.waypoints.iter_mut() {
            if let Some(landmark) = waypoint.landmark_id.and_then(|id| catalog.get(id)) {
                waypoint.display_name = landmark.name(language).to_string();
            }
        }

        log::info!("Language switched to {}", language.code());
        self.emit(PlannerEvent::LanguageChanged(language));
        self.emit(PlannerEvent::WaypointsChanged);
        self.sync_session();
    }

    /// Common tail of every list mutation.
    pub(super) fn after_mutation(&mut self) {
        self.emit(PlannerEvent::WaypointsChanged);
        self.sync_session();

        let resolved = self.waypoints.resolved_coordinates();
        if resolved.len() < 2 {
            self.invalidate_route();
            return;
        }
        // A summary or in-flight request for other points no longer applies.
        if resolved != self.routed_coordinates {
            self.invalidate_route();
        }
        if self.auto_route {
            let _ = self.compute_route();
        }
    }

    /// Re-encode the session and announce it if it changed.
    pub(super) fn sync_session(&mut self) {
        let query = url_state::encode(
            self.language,
            self.waypoints.iter().map(|w| w.coordinates),
        );
        if query != self.last_query {
            self.last_query = query.clone();
            self.emit(PlannerEvent::SessionChanged(query));
        }
    }
}
