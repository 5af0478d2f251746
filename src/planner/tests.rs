use super::*;
use crate::data::{LandmarkCatalog, LandmarkId};
use crate::geo::LatLng;
use crate::i18n::Language;
use crate::map::{
    GeoPosition, GeocodeCandidate, GeocodeError, GeocodeRequest, GeolocationError, MapAdapter,
    MarkerHandle, MarkerStyle, RouteRequest, RouteSummary, RoutingError,
};
use std::collections::BTreeMap;

/// Map adapter that records every call.
#[derive(Default)]
struct RecordingMap {
    next_marker: u64,
    markers: BTreeMap<MarkerHandle, (LatLng, MarkerStyle)>,
    route_requests: Vec<RouteRequest>,
    searches: Vec<GeocodeRequest>,
    shown_routes: usize,
    cleared_routes: usize,
    centered: Vec<(LatLng, f64)>,
}

impl RecordingMap {
    fn waypoint_markers(&self) -> usize {
        self.markers
            .values()
            .filter(|(_, s)| *s == MarkerStyle::Waypoint)
            .count()
    }
}

impl MapAdapter for RecordingMap {
    fn place_marker(&mut self, coordinates: LatLng, style: MarkerStyle) -> MarkerHandle {
        self.next_marker += 1;
        let handle = MarkerHandle(self.next_marker);
        self.markers.insert(handle, (coordinates, style));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }

    fn request_route(&mut self, request: RouteRequest) {
        self.route_requests.push(request);
    }

    fn show_route(&mut self, _geometry: &[LatLng]) {
        self.shown_routes += 1;
    }

    fn clear_route(&mut self) {
        self.cleared_routes += 1;
    }

    fn center_on(&mut self, coordinates: LatLng, zoom: f64) {
        self.centered.push((coordinates, zoom));
    }

    fn search(&mut self, request: GeocodeRequest) {
        self.searches.push(request);
    }
}

const L_COORDS: LatLng = LatLng::new(55.75, 37.62);
const FREE_COORDS: LatLng = LatLng::new(55.80, 37.70);

/// One landmark "A"/"А" at (55.75, 37.62).
fn catalog() -> LandmarkCatalog {
    LandmarkCatalog::from_json(
        r#"[
            {"lat": 55.75, "lng": 37.62,
             "name": {"zh": "A", "ru": "А"},
             "description": {"zh": "d", "ru": "о"}},
            {"lat": 55.76, "lng": 37.61,
             "name": {"zh": "剧院", "ru": "Театр"},
             "description": {"zh": "d", "ru": "о"}}
        ]"#,
    )
    .unwrap()
}

fn planner() -> RoutePlanner<RecordingMap> {
    RoutePlanner::new(RecordingMap::default(), catalog(), PlannerOptions::default())
}

fn summary() -> RouteSummary {
    RouteSummary {
        distance_m: 8200.0,
        duration_s: 900.0,
        geometry: vec![L_COORDS, FREE_COORDS],
    }
}

fn contents(planner: &RoutePlanner<RecordingMap>) -> Vec<(String, Option<LatLng>, Option<LandmarkId>)> {
    planner
        .waypoints()
        .iter()
        .map(|w| (w.display_name.clone(), w.coordinates, w.landmark_id))
        .collect()
}

/// Start at landmark L, end at a free point.
fn two_point_plan() -> RoutePlanner<RecordingMap> {
    let mut p = planner();
    p.set_point("A", L_COORDS, Some(LandmarkId(0)), Some(0), false);
    p.set_point("Free", FREE_COORDS, None, Some(1), false);
    p
}

#[test]
fn test_landmark_markers_placed_on_start() {
    let p = planner();
    assert_eq!(p.map().markers.len(), 2);
    let (handle, _) = p.map().markers.iter().next().unwrap();
    assert_eq!(p.landmark_for_marker(*handle), Some(LandmarkId(0)));
}

#[test]
fn test_set_point_into_empty_slots_matches_inputs() {
    let mut p = planner();
    let inputs = [
        LatLng::new(1.0, 2.0),
        LatLng::new(3.0, 4.0),
        LatLng::new(5.0, 6.0),
        LatLng::new(7.0, 8.0),
    ];
    for (i, point) in inputs.iter().enumerate() {
        p.set_point(format!("p{}", i), *point, None, None, false);
    }

    assert_eq!(p.waypoints().len(), inputs.len());
    let stored: Vec<LatLng> = p.waypoints().iter().filter_map(|w| w.coordinates).collect();
    assert_eq!(stored[0], inputs[0]);
    assert_eq!(stored.len(), inputs.len());
    for point in &inputs {
        assert!(stored.contains(point));
    }
    assert_eq!(p.map().waypoint_markers(), inputs.len());
}

#[test]
fn test_set_point_replaces_marker_of_same_slot() {
    let mut p = planner();
    p.set_point("a", L_COORDS, None, Some(0), false);
    p.set_point("b", FREE_COORDS, None, Some(0), false);
    assert_eq!(p.map().waypoint_markers(), 1);
    assert_eq!(p.waypoints()[0].coordinates, Some(FREE_COORDS));
    assert_eq!(p.waypoints().len(), 2);
}

#[test]
fn test_set_point_drops_mismatched_landmark_binding() {
    let mut p = planner();
    p.set_point("x", FREE_COORDS, Some(LandmarkId(0)), None, false);
    assert_eq!(p.waypoints()[0].landmark_id, None);
    p.set_point("y", L_COORDS, Some(LandmarkId(42)), None, false);
    assert_eq!(p.waypoints()[1].landmark_id, None);
}

#[test]
fn test_remove_slot_keeps_two_rows() {
    let mut p = two_point_plan();
    p.remove_slot(0);
    p.remove_slot(1);
    assert_eq!(p.waypoints().len(), 2);
    assert!(p.waypoints().iter().all(|w| *w == Waypoint::default()));
    assert_eq!(p.map().waypoint_markers(), 0);
}

#[test]
fn test_remove_interior_slot_shrinks_by_one() {
    let mut p = two_point_plan();
    let via = p.add_slot_after(0);
    p.set_point("via", LatLng::new(55.7, 37.6), None, Some(via), false);
    assert_eq!(p.waypoints().len(), 3);

    p.remove_slot(1);
    assert_eq!(p.waypoints().len(), 2);
    assert_eq!(p.map().waypoint_markers(), 2);
}

#[test]
fn test_reorder_preserves_contents() {
    let mut p = two_point_plan();
    p.on_map_click(LatLng::new(55.7, 37.5));
    let mut before = contents(&p);

    p.reorder(2, 0);
    let mut after = contents(&p);
    assert_eq!(after[0].1, Some(LatLng::new(55.7, 37.5)));
    assert_eq!(after[1].1, Some(L_COORDS));

    let key = |c: &(String, Option<LatLng>, Option<LandmarkId>)| c.0.clone();
    before.sort_by_key(key);
    after.sort_by_key(key);
    assert_eq!(before, after);
}

#[test]
fn test_compute_route_needs_two_points() {
    let mut p = planner();
    assert_eq!(p.compute_route(), Err(PlannerError::InsufficientWaypoints));
    p.set_point("a", L_COORDS, None, None, false);
    assert_eq!(p.compute_route(), Err(PlannerError::InsufficientWaypoints));

    assert!(p.map().route_requests.is_empty());
    assert!(p.route_summary().is_none());
    assert!(p
        .drain_events()
        .contains(&PlannerEvent::Notice(PlannerError::InsufficientWaypoints)));
}

#[test]
fn test_route_scenario() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();

    assert_eq!(p.map().route_requests.len(), 1);
    assert_eq!(p.map().route_requests[0].coordinates, vec![L_COORDS, FREE_COORDS]);
    assert!(p.is_route_pending());

    p.on_route_result(token, Ok(summary()));
    assert!(p.route_summary().is_some());
    assert!(!p.is_route_pending());
    assert_eq!(p.map().shown_routes, 1);

    let events = p.drain_events();
    assert!(events.contains(&PlannerEvent::RouteSummaryUpdated));
    assert!(!events.contains(&PlannerEvent::RouteCleared));
}

#[test]
fn test_stale_route_result_is_ignored() {
    let mut p = two_point_plan();
    let first = p.compute_route().unwrap();
    let second = p.compute_route().unwrap();
    assert!(second > first);

    p.on_route_result(first, Ok(summary()));
    assert!(p.route_summary().is_none());
    assert!(p.is_route_pending());

    p.on_route_result(second, Ok(summary()));
    assert!(p.route_summary().is_some());
}

#[test]
fn test_route_failure_clears_summary() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();
    p.on_route_result(token, Ok(summary()));
    p.drain_events();

    let token = p.compute_route().unwrap();
    p.on_route_result(token, Err(RoutingError::NoRoute("NoRoute".to_string())));

    assert!(p.route_summary().is_none());
    assert_eq!(p.map().cleared_routes, 1);
    let events = p.drain_events();
    assert!(events.contains(&PlannerEvent::RouteCleared));
    assert!(events
        .iter()
        .any(|e| matches!(e, PlannerEvent::Notice(PlannerError::RouteComputationFailed(_)))));
}

#[test]
fn test_dropping_below_two_points_clears_route() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();
    p.on_route_result(token, Ok(summary()));
    p.drain_events();

    p.remove_slot(1);
    assert!(p.route_summary().is_none());
    assert!(p.drain_events().contains(&PlannerEvent::RouteCleared));
}

#[test]
fn test_auto_route_recomputes_after_mutation() {
    let options = PlannerOptions {
        auto_route: true,
        ..Default::default()
    };
    let mut p = RoutePlanner::new(RecordingMap::default(), catalog(), options);
    p.set_point("a", L_COORDS, None, None, false);
    assert!(p.map().route_requests.is_empty());
    p.set_point("b", FREE_COORDS, None, None, false);
    assert_eq!(p.map().route_requests.len(), 1);
    p.reorder(0, 1);
    assert_eq!(p.map().route_requests.len(), 2);
    assert_eq!(p.map().route_requests[1].coordinates, vec![FREE_COORDS, L_COORDS]);
}

#[test]
fn test_edit_while_route_in_flight_drops_the_request() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();

    p.on_map_click(LatLng::new(55.7, 37.5));
    assert!(!p.is_route_pending());

    p.on_route_result(token, Ok(summary()));
    assert!(p.route_summary().is_none());
    assert_eq!(p.map().shown_routes, 0);
}

#[test]
fn test_edit_after_route_clears_summary() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();
    p.on_route_result(token, Ok(summary()));
    p.drain_events();

    p.reorder(0, 1);
    assert!(p.route_summary().is_none());
    assert_eq!(p.map().cleared_routes, 1);
    assert!(p.drain_events().contains(&PlannerEvent::RouteCleared));
}

#[test]
fn test_empty_row_keeps_summary() {
    let mut p = two_point_plan();
    let token = p.compute_route().unwrap();
    p.on_route_result(token, Ok(summary()));

    p.add_slot_after(0);
    p.remove_slot(1);
    assert!(p.route_summary().is_some());
}

#[test]
fn test_switch_language_rebinds_landmark_names_only() {
    let mut p = two_point_plan();
    p.switch_language(Language::Ru);

    assert_eq!(p.waypoints()[0].display_name, "А");
    assert_eq!(p.waypoints()[1].display_name, "Free");
    assert_eq!(p.language(), Language::Ru);

    let events = p.drain_events();
    assert!(events.contains(&PlannerEvent::LanguageChanged(Language::Ru)));
    assert!(events.iter().any(
        |e| matches!(e, PlannerEvent::SessionChanged(q) if q.starts_with("?lang=ru&place=55.75,37.62"))
    ));
}

#[test]
fn test_clear_resets_everything() {
    let mut p = two_point_plan();
    p.on_map_click(LatLng::new(55.7, 37.5));
    let token = p.compute_route().unwrap();
    p.on_route_result(token, Ok(summary()));
    p.drain_events();

    p.clear();
    assert_eq!(p.waypoints().len(), 2);
    assert!(p.waypoints().iter().all(|w| !w.is_resolved()));
    assert_eq!(p.map().waypoint_markers(), 0);
    assert!(p.route_summary().is_none());
    assert_eq!(p.session_query(), "?lang=zh");

    let events = p.drain_events();
    assert!(events.contains(&PlannerEvent::RouteCleared));
    assert!(events.contains(&PlannerEvent::SessionChanged("?lang=zh".to_string())));
}

#[test]
fn test_map_click_uses_localized_label_and_appends() {
    let mut p = two_point_plan();
    let index = p.on_map_click(LatLng::new(55.7, 37.5));
    assert_eq!(index, 2);
    assert_eq!(p.waypoints()[2].display_name, "地图位置 (55.700000, 37.500000)");
}

#[test]
fn test_catalog_select_targets() {
    let mut p = planner();
    assert_eq!(p.on_catalog_select(LandmarkId(1), SlotTarget::End), Some(1));
    assert_eq!(p.on_catalog_select(LandmarkId(0), SlotTarget::Start), Some(0));
    assert_eq!(p.waypoints()[0].landmark_id, Some(LandmarkId(0)));
    assert_eq!(p.waypoints()[1].display_name, "剧院");

    assert_eq!(p.on_catalog_select(LandmarkId(1), SlotTarget::Stop), Some(2));
    assert_eq!(p.on_catalog_select(LandmarkId(9), SlotTarget::Stop), None);
}

#[test]
fn test_resolve_typed_matches_landmark_or_searches() {
    let mut p = planner();
    p.resolve_typed(1, "Театр");
    assert_eq!(p.waypoints()[1].landmark_id, Some(LandmarkId(1)));
    assert_eq!(p.waypoints()[1].display_name, "剧院");

    p.resolve_typed(0, "Tverskaya 1");
    assert_eq!(p.map().searches.len(), 1);
    assert_eq!(p.map().searches[0].slot, Some(0));

    p.resolve_typed(1, "  ");
    assert!(!p.waypoints()[1].is_resolved());
}

#[test]
fn test_search_result_fills_requested_slot() {
    let mut p = two_point_plan();
    let stale = p.search("old", Some(1)).unwrap();
    let token = p.search("Tverskaya", Some(1)).unwrap();

    let hit = GeocodeCandidate {
        display_name: "Tverskaya, Moscow".to_string(),
        coordinates: LatLng::new(55.76, 37.60),
    };
    p.on_search_results(stale, Ok(vec![]));
    assert!(p.search_results().is_empty());
    p.on_search_results(token, Ok(vec![hit.clone()]));
    assert_eq!(p.search_results().len(), 1);

    assert_eq!(p.on_search_result(0), Some(1));
    assert_eq!(p.waypoints()[1].display_name, hit.display_name);
    assert_eq!(p.waypoints()[1].landmark_id, None);
    assert!(p.search_results().is_empty());
}

#[test]
fn test_search_failure_is_a_notice() {
    let mut p = planner();
    let token = p.search("x", None).unwrap();
    p.on_search_results(token, Err(GeocodeError::Status(503)));
    assert!(p
        .drain_events()
        .iter()
        .any(|e| matches!(e, PlannerEvent::Notice(PlannerError::GeocodingFailed(_)))));
    assert!(p.search("   ", None).is_none());
}

#[test]
fn test_geolocation_updates_and_ordering() {
    let mut p = planner();
    let first = GeoPosition {
        coordinates: LatLng::new(55.70, 37.50),
        timestamp_ms: 2000.0,
    };
    let older = GeoPosition {
        coordinates: LatLng::new(10.0, 10.0),
        timestamp_ms: 1000.0,
    };

    p.on_geolocation(Ok(first));
    p.on_geolocation(Ok(older));
    assert_eq!(p.user_position(), Some(first));
    assert_eq!(p.map().centered, vec![(first.coordinates, 14.0)]);

    let user_markers = p
        .map()
        .markers
        .values()
        .filter(|(_, s)| *s == MarkerStyle::UserLocation)
        .count();
    assert_eq!(user_markers, 1);

    assert_eq!(p.use_my_location(), Ok(0));
    assert_eq!(p.waypoints()[0].display_name, "我的位置");
}

#[test]
fn test_geolocation_error_leaves_state_untouched() {
    let mut p = two_point_plan();
    let before = contents(&p);
    p.drain_events();

    p.on_geolocation(Err(GeolocationError::Timeout));
    assert_eq!(contents(&p), before);
    assert_eq!(
        p.drain_events(),
        vec![PlannerEvent::Notice(PlannerError::GeolocationTimeout)]
    );
    assert_eq!(
        planner().use_my_location(),
        Err(PlannerError::GeolocationPositionUnavailable)
    );
}

#[test]
fn test_restore_session_with_two_places_routes_once() {
    let mut p = planner();
    let restored = p.restore_session("?lang=ru&place=55.75,37.62&place=55.8,37.7");

    assert_eq!(restored, 2);
    assert_eq!(p.language(), Language::Ru);
    assert_eq!(p.map().route_requests.len(), 1);
    assert_eq!(p.waypoints()[0].display_name, "А");
    assert_eq!(p.waypoints()[0].landmark_id, Some(LandmarkId(0)));
    assert_eq!(p.waypoints()[1].display_name, "Точка на карте (55.800000, 37.700000)");
    assert_eq!(p.waypoints()[1].landmark_id, None);
}

#[test]
fn test_restore_session_with_fewer_places_does_not_route() {
    let mut p = planner();
    assert_eq!(p.restore_session("?lang=zh"), 0);
    assert!(p.map().route_requests.is_empty());

    let mut p = planner();
    assert_eq!(p.restore_session("?place=55.75,37.62"), 1);
    assert!(p.map().route_requests.is_empty());
}

#[test]
fn test_restore_session_skips_malformed_places() {
    let mut p = planner();
    let restored = p.restore_session("place=55.75,37.62&place=oops&place=55.8,37.7&place=55.9,37.8");
    assert_eq!(restored, 3);
    assert_eq!(p.waypoints().len(), 3);
    assert_eq!(p.map().route_requests.len(), 1);
    assert_eq!(
        p.map().route_requests[0].coordinates,
        vec![L_COORDS, FREE_COORDS, LatLng::new(55.9, 37.8)]
    );
    assert!(p
        .drain_events()
        .contains(&PlannerEvent::Notice(PlannerError::MalformedSessionUrl("oops".to_string()))));
}
