//! Geographic primitives and map canvas drawing.
//!
//! This module provides:
//! - The [`LatLng`] coordinate pair used everywhere in the planner
//! - Web Mercator projection between coordinates and canvas pixels
//! - Slippy-map tile addressing for the base layer
//! - Painting of markers and the route polyline

mod projection;
mod renderer;
mod tiles;

use geo_types::Coord;
use serde::{Deserialize, Serialize};

pub use projection::MapProjection;
pub use renderer::{render_marker, render_route_line};
pub use tiles::{visible_tiles, TileId};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True if both components are finite and within geographic bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(p: LatLng) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(c: Coord<f64>) -> Self {
        LatLng { lat: c.y, lng: c.x }
    }
}
