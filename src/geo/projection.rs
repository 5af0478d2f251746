//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates using spherical Web Mercator, the same projection
//! the base tile layer is rendered in.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use std::f64::consts::PI;

/// Size of one map tile in screen pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Mercator projection is undefined at the poles; clamp to the tile-layer limit.
const MAX_LATITUDE: f64 = 85.051_128_78;

pub const MIN_ZOOM: f64 = 2.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center of the view as (lon, lat)
    pub center: Coord<f64>,
    /// Fractional slippy-map zoom level
    pub zoom: f64,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center: Coord { x: 0.0, y: 0.0 },
            zoom: MIN_ZOOM,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub fn new(center: Coord<f64>, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..Default::default()
        }
    }

    /// Updates the canvas rectangle for this frame.
    pub fn update(&mut self, screen_rect: Rect) {
        self.screen_rect = screen_rect;
    }

    /// World size in pixels at the current zoom.
    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Converts (lon, lat) to world pixel coordinates at the current zoom.
    pub fn geo_to_world(&self, coord: Coord<f64>) -> (f64, f64) {
        let size = self.world_size();
        let lat = coord.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (coord.x + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    /// Converts world pixel coordinates back to (lon, lat).
    ///
    /// The world repeats horizontally, so the longitude is wrapped into
    /// `[-180, 180)`.
    pub fn world_to_geo(&self, x: f64, y: f64) -> Coord<f64> {
        let size = self.world_size();
        let lon = wrap_longitude(x / size * 360.0 - 180.0);
        let n = PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        Coord { x: lon, y: lat }
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    ///
    /// Uses the world copy nearest the view center.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let (cx, cy) = self.geo_to_world(self.center);
        let (x, y) = self.geo_to_world(coord);
        let size = self.world_size();
        let dx = (x - cx + size / 2.0).rem_euclid(size) - size / 2.0;
        let origin = self.screen_rect.center();
        Pos2::new(origin.x + dx as f32, origin.y + (y - cy) as f32)
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let (cx, cy) = self.geo_to_world(self.center);
        let origin = self.screen_rect.center();
        self.world_to_geo(
            cx + (pos.x - origin.x) as f64,
            cy + (pos.y - origin.y) as f64,
        )
    }

    /// Moves the view by a screen-space drag delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        let (cx, cy) = self.geo_to_world(self.center);
        let size = self.world_size();
        let x = (cx - delta.x as f64).rem_euclid(size);
        let y = (cy - delta.y as f64).clamp(0.0, size);
        self.center = self.world_to_geo(x, y);
    }

    /// Zooms by `delta` levels, keeping the geographic point under `anchor` fixed.
    pub fn zoom_around(&mut self, delta: f64, anchor: Pos2) {
        let (cx, cy) = self.geo_to_world(self.center);
        let origin = self.screen_rect.center();
        let dx = (anchor.x - origin.x) as f64;
        let dy = (anchor.y - origin.y) as f64;

        let new_zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        let scale = 2f64.powf(new_zoom - self.zoom);
        self.zoom = new_zoom;

        // Anchor keeps its world position; the center moves relative to it.
        let ax = (cx + dx) * scale;
        let ay = (cy + dy) * scale;
        self.center = self.world_to_geo(ax - dx, ay - dy);
    }

    /// Checks if a coordinate is within the visible canvas (with a pixel margin).
    pub fn is_visible(&self, coord: Coord<f64>, margin_px: f32) -> bool {
        self.screen_rect
            .expand(margin_px)
            .contains(self.geo_to_screen(coord))
    }
}

/// Normalize a longitude in degrees into `[-180, 180)`.
fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::state::url_state;
    use approx::assert_relative_eq;

    fn moscow() -> MapProjection {
        let mut projection = MapProjection::new(Coord { x: 37.6173, y: 55.7558 }, 11.0);
        projection.update(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)));
        projection
    }

    #[test]
    fn test_center_maps_to_screen_center() {
        let projection = moscow();
        let pos = projection.geo_to_screen(projection.center);
        assert_relative_eq!(pos.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(pos.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_screen_geo_round_trip() {
        let projection = moscow();
        let coord = Coord { x: 37.70, y: 55.80 };
        let back = projection.screen_to_geo(projection.geo_to_screen(coord));
        assert_relative_eq!(back.x, coord.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, coord.y, epsilon = 1e-4);
    }

    #[test]
    fn test_north_is_up() {
        let projection = moscow();
        let north = projection.geo_to_screen(Coord { x: 37.6173, y: 55.9 });
        assert!(north.y < 300.0);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut projection = moscow();
        let anchor = Pos2::new(600.0, 150.0);
        let before = projection.screen_to_geo(anchor);
        projection.zoom_around(1.0, anchor);
        let after = projection.screen_to_geo(anchor);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-3);
        assert_relative_eq!(projection.zoom, 12.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut projection = moscow();
        projection.zoom_around(100.0, Pos2::new(400.0, 300.0));
        assert_relative_eq!(projection.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_click_past_antimeridian_wraps() {
        let mut projection = MapProjection::new(Coord { x: 179.0, y: 55.0 }, 4.0);
        projection.update(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)));

        let click = Pos2::new(700.0, 300.0);
        let coord = projection.screen_to_geo(click);
        assert!((-180.0..180.0).contains(&coord.x));
        assert_relative_eq!(coord.x, -154.6328125, epsilon = 1e-6);

        // The wrapped point is still drawn where it was clicked.
        let pos = projection.geo_to_screen(coord);
        assert_relative_eq!(pos.x, 700.0, epsilon = 1e-3);

        // And it survives a trip through the share URL.
        let point = crate::geo::LatLng::from(coord);
        let query = url_state::encode(Language::Zh, [Some(point)]);
        let params = url_state::decode(&query);
        assert!(params.malformed.is_empty());
        assert_eq!(params.places, vec![point]);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_relative_eq!(wrap_longitude(205.0), -155.0);
        assert_relative_eq!(wrap_longitude(-190.0), 170.0);
        assert_relative_eq!(wrap_longitude(37.5), 37.5);
        assert_relative_eq!(wrap_longitude(180.0), -180.0);
    }
}
