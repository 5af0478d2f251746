//! The egui map: viewport, markers, route line and service channels.
//!
//! [`MapView`] is the production [`MapAdapter`]. It only records what the
//! planner asks for; the canvas reads that back when painting, and the app
//! polls the service channels once per frame.

use super::adapter::MapAdapter;
use super::geocode::{GeocodeChannel, GeocodeResult};
use super::routing::{RouteResult, RoutingChannel};
use super::types::{GeocodeRequest, MarkerHandle, MarkerStyle, RouteRequest};
use crate::geo::{LatLng, MapProjection};
use crate::state::Settings;
use eframe::egui::{self, Pos2, Vec2};
use std::collections::BTreeMap;

/// Screen offset from a marker's tip to the centre of its head.
const MARKER_HEAD_OFFSET: f32 = 14.0;
/// Click radius around a marker head.
const MARKER_HIT_RADIUS: f32 = 9.0;

/// A marker as placed by the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapMarker {
    pub coordinates: LatLng,
    pub style: MarkerStyle,
}

pub struct MapView {
    ctx: egui::Context,
    /// Current viewport
    pub projection: MapProjection,
    tile_url: String,
    markers: BTreeMap<MarkerHandle, MapMarker>,
    next_handle: u64,
    route: Vec<LatLng>,
    routing: RoutingChannel,
    geocoder: GeocodeChannel,
}

impl MapView {
    pub fn new(ctx: egui::Context, settings: &Settings) -> Self {
        Self {
            ctx,
            projection: MapProjection::new(settings.default_center.into(), settings.default_zoom),
            tile_url: settings.tile_url.clone(),
            markers: BTreeMap::new(),
            next_handle: 0,
            route: Vec::new(),
            routing: RoutingChannel::new(settings.routing_url.clone()),
            geocoder: GeocodeChannel::new(settings.geocoder_url.clone()),
        }
    }

    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    /// Markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &MapMarker)> {
        self.markers.iter().map(|(h, m)| (*h, m))
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&MapMarker> {
        self.markers.get(&handle)
    }

    /// Route polyline currently shown, empty when none.
    pub fn route(&self) -> &[LatLng] {
        &self.route
    }

    /// Topmost marker whose head is under `pos`.
    pub fn marker_at(&self, pos: Pos2) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .rev()
            .find(|(_, marker)| {
                let tip = self.projection.geo_to_screen(marker.coordinates.into());
                let head = tip - Vec2::new(0.0, MARKER_HEAD_OFFSET);
                head.distance(pos) <= MARKER_HIT_RADIUS
            })
            .map(|(handle, _)| *handle)
    }

    /// Take a finished route request, if any.
    pub fn poll_route(&self) -> Option<RouteResult> {
        self.routing.try_recv()
    }

    /// Take a finished geocoder lookup, if any.
    pub fn poll_search(&self) -> Option<GeocodeResult> {
        self.geocoder.try_recv()
    }
}

impl MapAdapter for MapView {
    fn place_marker(&mut self, coordinates: LatLng, style: MarkerStyle) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.markers.insert(handle, MapMarker { coordinates, style });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }

    fn request_route(&mut self, request: RouteRequest) {
        self.routing.request(self.ctx.clone(), request);
    }

    fn show_route(&mut self, geometry: &[LatLng]) {
        self.route = geometry.to_vec();
        self.ctx.request_repaint();
    }

    fn clear_route(&mut self) {
        self.route.clear();
        self.ctx.request_repaint();
    }

    fn center_on(&mut self, coordinates: LatLng, zoom: f64) {
        self.projection = MapProjection {
            screen_rect: self.projection.screen_rect,
            ..MapProjection::new(coordinates.into(), zoom)
        };
        self.ctx.request_repaint();
    }

    fn search(&mut self, request: GeocodeRequest) {
        self.geocoder.request(self.ctx.clone(), request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Rect;

    fn view() -> MapView {
        let mut view = MapView::new(egui::Context::default(), &Settings::default());
        view.projection
            .update(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)));
        view
    }

    #[test]
    fn test_markers_have_unique_handles() {
        let mut view = view();
        let a = view.place_marker(LatLng::new(55.75, 37.62), MarkerStyle::Landmark);
        let b = view.place_marker(LatLng::new(55.75, 37.62), MarkerStyle::Waypoint);
        assert_ne!(a, b);

        view.remove_marker(a);
        view.remove_marker(MarkerHandle(999));
        assert!(view.marker(a).is_none());
        assert_eq!(view.marker(b).map(|m| m.style), Some(MarkerStyle::Waypoint));
    }

    #[test]
    fn test_marker_hit_prefers_topmost() {
        let mut view = view();
        let point = LatLng::new(55.75, 37.62);
        view.center_on(point, 14.0);
        let below = view.place_marker(point, MarkerStyle::Landmark);
        let above = view.place_marker(point, MarkerStyle::Waypoint);

        let head = Pos2::new(400.0, 300.0 - MARKER_HEAD_OFFSET);
        assert_eq!(view.marker_at(head), Some(above));

        view.remove_marker(above);
        assert_eq!(view.marker_at(head), Some(below));
        assert_eq!(view.marker_at(Pos2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_center_on_keeps_canvas_rect() {
        let mut view = view();
        view.center_on(LatLng::new(10.0, 20.0), 15.0);
        assert_eq!(view.projection.zoom, 15.0);
        assert_eq!(view.projection.screen_rect.width(), 800.0);
        assert_eq!(
            view.projection.geo_to_screen(LatLng::new(10.0, 20.0).into()),
            Pos2::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_route_show_and_clear() {
        let mut view = view();
        let line = [LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)];
        view.show_route(&line);
        assert_eq!(view.route(), &line);
        view.clear_route();
        assert!(view.route().is_empty());
    }
}
