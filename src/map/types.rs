//! Type definitions shared across the map adapter boundary.

use crate::geo::LatLng;
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a marker placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Visual role of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Catalog landmark
    Landmark,
    /// A point of the route plan
    Waypoint,
    /// The user's geolocated position
    UserLocation,
}

/// Identifies one route computation. Tokens increase monotonically; only
/// the most recently issued one is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteToken(pub u64);

/// Identifies one geocoding lookup, superseded the same way as [`RouteToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchToken(pub u64);

/// Travel profile requested from the routing engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
}

impl TravelMode {
    pub fn all() -> &'static [TravelMode] {
        &[TravelMode::Driving, TravelMode::Walking]
    }

    /// Profile segment of the routing URL.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "foot",
        }
    }
}

/// A request for route geometry through ordered points.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub token: RouteToken,
    pub coordinates: Vec<LatLng>,
    pub language: Language,
    pub mode: TravelMode,
}

/// Result of a successful route computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Total distance in metres
    pub distance_m: f64,
    /// Total travel time in seconds
    pub duration_s: f64,
    /// Route polyline, start to end
    pub geometry: Vec<LatLng>,
}

impl RouteSummary {
    /// Distance formatted in kilometres with two decimals.
    pub fn distance_km_label(&self) -> String {
        format!("{:.2}", self.distance_m / 1000.0)
    }

    /// Travel time in whole minutes.
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_s / 60.0).round().max(0.0) as u64
    }
}

/// A place-name lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub token: SearchToken,
    /// Waypoint slot the chosen candidate should fill, if any.
    pub slot: Option<usize>,
    pub query: String,
    pub language: Language,
}

/// One geocoder hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub display_name: String,
    pub coordinates: LatLng,
}

/// A geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub coordinates: LatLng,
    /// Time the fix was taken, in milliseconds since the Unix epoch.
    pub timestamp_ms: f64,
}

/// Why a geolocation fix could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
    #[error("unknown geolocation error")]
    Unknown,
}

impl GeolocationError {
    /// Map a `GeolocationPositionError.code` value.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

/// Failure reported by the routing engine transport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("routing engine responded with {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no route found ({0})")]
    NoRoute(String),
}

/// Failure reported by the geocoder transport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("geocoder responded with {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}
