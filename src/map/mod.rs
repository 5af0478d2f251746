//! Map integration.
//!
//! This module provides:
//! - The [`MapAdapter`] seam the planner drives
//! - The egui [`MapView`] implementing it: markers, route line, viewport
//! - Channels bridging the async routing and geocoding services, and the
//!   browser geolocation watch, into the synchronous update loop

mod adapter;
mod geocode;
mod geolocation;
mod routing;
mod types;
mod view;

pub use adapter::MapAdapter;
pub use geolocation::GeolocationWatch;
pub use types::{
    GeoPosition, GeocodeCandidate, GeocodeError, GeocodeRequest, GeolocationError, MarkerHandle,
    MarkerStyle, RouteRequest, RouteSummary, RouteToken, RoutingError, SearchToken, TravelMode,
};
pub use view::MapView;
