//! The seam between the route planner and the map.

use super::types::{GeocodeRequest, MarkerHandle, MarkerStyle, RouteRequest};
use crate::geo::LatLng;

/// Operations the planner needs from the map.
///
/// Side effects stay on the map. Asynchronous results (routes, geocoder
/// hits) are not returned here; the implementation delivers them later and
/// the owner hands them back to the planner together with the request token.
pub trait MapAdapter {
    /// Place a marker and return a handle for removing it later.
    fn place_marker(&mut self, coordinates: LatLng, style: MarkerStyle) -> MarkerHandle;

    /// Remove a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Start a route computation. Supersedes any earlier unresolved request.
    fn request_route(&mut self, request: RouteRequest);

    /// Draw the computed route geometry.
    fn show_route(&mut self, geometry: &[LatLng]);

    /// Remove any drawn route.
    fn clear_route(&mut self);

    /// Move the viewport.
    fn center_on(&mut self, coordinates: LatLng, zoom: f64);

    /// Start a place-name lookup.
    fn search(&mut self, request: GeocodeRequest);
}
