//! Command handlers: user and platform input dispatched into the planner.

use super::session::RoutePlanner;
use super::{PlannerError, PlannerEvent};
use crate::data::LandmarkId;
use crate::geo::LatLng;
use crate::i18n::{map_point_label, texts};
use crate::map::{
    GeoPosition, GeocodeCandidate, GeocodeError, GeocodeRequest, GeolocationError, MapAdapter,
    MarkerStyle, SearchToken,
};
use crate::state::url_state;

/// Zoom used when centering on the user's position.
const LOCATE_ZOOM: f64 = 14.0;
/// Zoom used when centering on a chosen search result.
const SEARCH_ZOOM: f64 = 15.0;
/// Zoom used when centering on a restored session.
const RESTORE_ZOOM: f64 = 12.0;

/// Where a catalog pick should land in the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTarget {
    /// Replace the start point.
    Start,
    /// Replace the end point.
    End,
    /// Fill the first empty start/end slot, else append.
    Stop,
}

impl<M: MapAdapter> RoutePlanner<M> {
    /// Click on empty map: add a free point, always appended in order.
    pub fn on_map_click(&mut self, coordinates: LatLng) -> usize {
        let label = map_point_label(self.language, coordinates.lat, coordinates.lng);
        self.set_point(label, coordinates, None, None, false)
    }

    /// A landmark was picked from the catalog list or its popup.
    pub fn on_catalog_select(&mut self, id: LandmarkId, target: SlotTarget) -> Option<usize> {
        let Some(landmark) = self.catalog.get(id) else {
            log::warn!("Unknown landmark {:?}", id);
            return None;
        };
        let name = landmark.name(self.language).to_string();
        let coordinates = landmark.coordinates;

        let slot = match target {
            SlotTarget::Start => Some(0),
            SlotTarget::End => Some(self.waypoints.last_index()),
            SlotTarget::Stop => None,
        };
        Some(self.set_point(name, coordinates, Some(id), slot, false))
    }

    /// Text was entered into a waypoint row.
    ///
    /// An exact landmark name (any language) resolves immediately; an empty
    /// text clears the row; anything else is sent to the geocoder for that row.
    pub fn resolve_typed(&mut self, slot: usize, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.clear_slot(slot);
            return;
        }

        if let Some(landmark) = self.catalog.find_by_name(text) {
            let name = landmark.name(self.language).to_string();
            let (coordinates, id) = (landmark.coordinates, landmark.id);
            self.set_point(name, coordinates, Some(id), Some(slot), false);
            return;
        }

        self.search(text, Some(slot));
    }

    /// Start a geocoder lookup; its results supersede any earlier lookup.
    pub fn search(&mut self, query: &str, slot: Option<usize>) -> Option<SearchToken> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.next_search_token += 1;
        let token = SearchToken(self.next_search_token);
        self.pending_search = Some((token, slot));
        self.search_results.clear();

        log::info!("Searching for {:?}", query);
        self.map.search(GeocodeRequest {
            token,
            slot,
            query: query.to_string(),
            language: self.language,
        });
        Some(token)
    }

    /// Apply geocoder results. Results for superseded lookups are dropped.
    pub fn on_search_results(
        &mut self,
        token: SearchToken,
        result: Result<Vec<GeocodeCandidate>, GeocodeError>,
    ) {
        if self.pending_search.map(|(t, _)| t) != Some(token) {
            log::debug!("Discarding stale search result {:?}", token);
            return;
        }

        match result {
            Ok(candidates) => {
                log::info!("Search returned {} candidates", candidates.len());
                self.search_results = candidates;
                self.emit(PlannerEvent::SearchResultsUpdated);
            }
            Err(e) => {
                self.pending_search = None;
                self.notice(e.into());
            }
        }
    }

    /// Candidates from the latest completed search.
    pub fn search_results(&self) -> &[GeocodeCandidate] {
        &self.search_results
    }

    /// Slot the current search was started for, if any.
    pub fn search_slot(&self) -> Option<usize> {
        self.pending_search.and_then(|(_, slot)| slot)
    }

    /// A search result was chosen: it becomes a free point.
    pub fn on_search_result(&mut self, index: usize) -> Option<usize> {
        let candidate = self.search_results.get(index)?.clone();
        let slot = self.search_slot();

        self.pending_search = None;
        self.search_results.clear();
        self.emit(PlannerEvent::SearchResultsUpdated);

        self.map.center_on(candidate.coordinates, SEARCH_ZOOM);
        Some(self.set_point(
            candidate.display_name,
            candidate.coordinates,
            None,
            slot,
            false,
        ))
    }

    /// Dismiss the current search results.
    pub fn cancel_search(&mut self) {
        self.pending_search = None;
        if !self.search_results.is_empty() {
            self.search_results.clear();
            self.emit(PlannerEvent::SearchResultsUpdated);
        }
    }

    /// A geolocation update arrived.
    ///
    /// A fix older than the one already applied is dropped. Errors leave
    /// all state untouched and are reported as notices.
    pub fn on_geolocation(&mut self, update: Result<GeoPosition, GeolocationError>) {
        let position = match update {
            Ok(position) => position,
            Err(e) => {
                self.notice(e.into());
                return;
            }
        };

        if let Some(current) = self.user_position {
            if position.timestamp_ms < current.timestamp_ms {
                log::debug!("Discarding out-of-order position fix");
                return;
            }
        }

        if let Some(marker) = self.user_marker.take() {
            self.map.remove_marker(marker);
        }
        self.user_marker = Some(
            self.map
                .place_marker(position.coordinates, MarkerStyle::UserLocation),
        );
        self.map.center_on(position.coordinates, LOCATE_ZOOM);
        self.user_position = Some(position);
        self.emit(PlannerEvent::UserLocationUpdated);
    }

    /// Latest applied geolocation fix.
    pub fn user_position(&self) -> Option<GeoPosition> {
        self.user_position
    }

    /// Put the user's position into the start slot.
    pub fn use_my_location(&mut self) -> Result<usize, PlannerError> {
        let Some(position) = self.user_position else {
            let error = PlannerError::GeolocationPositionUnavailable;
            self.notice(error.clone());
            return Err(error);
        };
        let label = texts(self.language).my_location;
        Ok(self.set_point(label, position.coordinates, None, Some(0), false))
    }

    /// Rebuild the session from a shared query string.
    ///
    /// Each place is matched exactly against the catalog to recover its
    /// landmark; unmatched places get the generic map-point label. Malformed
    /// places are reported and skipped. With two or more places the route is
    /// computed once. Returns the number of places restored.
    pub fn restore_session(&mut self, query: &str) -> usize {
        let params = url_state::decode(query);

        if let Some(language) = params.language {
            self.switch_language(language);
        }
        for value in params.malformed {
            self.notice(PlannerError::MalformedSessionUrl(value));
        }
        if params.places.is_empty() {
            return 0;
        }

        for place in &params.places {
            let (name, landmark_id) = match self.catalog.find_by_coordinates(*place) {
                Some(landmark) => (landmark.name(self.language).to_string(), Some(landmark.id)),
                None => (map_point_label(self.language, place.lat, place.lng), None),
            };
            self.fill_slot(name, *place, landmark_id, None, false);
        }

        log::info!("Restored {} places from URL", params.places.len());
        self.map.center_on(params.places[0], RESTORE_ZOOM);
        self.emit(PlannerEvent::WaypointsChanged);
        self.sync_session();

        if params.places.len() >= 2 {
            let _ = self.compute_route();
        }
        params.places.len()
    }
}
