//! Slippy-map tile addressing for the base layer.

use super::projection::{MapProjection, TILE_SIZE};
use eframe::egui::{Pos2, Rect, Vec2};

/// Address of one base-layer tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileId {
    /// Interpolate a `{z}/{x}/{y}` URL template; `{s}` picks a subdomain.
    pub fn url(&self, template: &str) -> String {
        let subdomain = ["a", "b", "c"][((self.x + self.y) % 3) as usize];
        template
            .replace("{s}", subdomain)
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Tiles covering the canvas at the integer zoom nearest the view, with
/// the screen rectangle each should be painted into.
pub fn visible_tiles(projection: &MapProjection) -> Vec<(TileId, Rect)> {
    let zoom = projection.zoom.round() as u8;
    let tile_count = 1i64 << zoom;

    // Tiles are fetched at integer zoom and scaled to the fractional one.
    let scale = 2f64.powf(projection.zoom - zoom as f64);
    let tile_px = TILE_SIZE * scale;

    let (cx, cy) = projection.geo_to_world(projection.center);
    let rect = projection.screen_rect;
    let origin = rect.center();
    let left = cx - (origin.x - rect.min.x) as f64;
    let top = cy - (origin.y - rect.min.y) as f64;
    let right = left + rect.width() as f64;
    let bottom = top + rect.height() as f64;

    let x0 = (left / tile_px).floor() as i64;
    let x1 = (right / tile_px).floor() as i64;
    let y0 = ((top / tile_px).floor() as i64).max(0);
    let y1 = ((bottom / tile_px).floor() as i64).min(tile_count - 1);

    let mut tiles = Vec::new();
    for ty in y0..=y1 {
        for tx in x0..=x1 {
            let min = Pos2::new(
                rect.min.x + (tx as f64 * tile_px - left) as f32,
                rect.min.y + (ty as f64 * tile_px - top) as f32,
            );
            let id = TileId {
                x: tx.rem_euclid(tile_count) as u32,
                y: ty as u32,
                zoom,
            };
            tiles.push((id, Rect::from_min_size(min, Vec2::splat(tile_px as f32))));
        }
    }
    tiles
}
