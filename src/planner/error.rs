//! Recoverable planner errors and their localized messages.

use crate::i18n::{texts, Language};
use crate::map::{GeocodeError, GeolocationError, RoutingError};
use thiserror::Error;

/// Every error the planner surfaces to the user.
///
/// None of these is fatal: each is reported as a notice at its point of
/// origin and the session continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("geolocation is not supported by this runtime")]
    GeolocationUnavailable,
    #[error("geolocation permission denied")]
    GeolocationDenied,
    #[error("geolocation timed out")]
    GeolocationTimeout,
    #[error("position unavailable")]
    GeolocationPositionUnavailable,
    #[error("unknown geolocation error")]
    GeolocationUnknown,
    #[error("at least two resolved waypoints are required")]
    InsufficientWaypoints,
    #[error("route computation failed: {0}")]
    RouteComputationFailed(String),
    #[error("place search failed: {0}")]
    GeocodingFailed(String),
    #[error("malformed place parameter: {0:?}")]
    MalformedSessionUrl(String),
}

impl PlannerError {
    /// Message shown to the user in `lang`.
    pub fn message(&self, lang: Language) -> String {
        let t = texts(lang);
        match self {
            Self::GeolocationUnavailable => t.geolocation_unsupported.to_string(),
            Self::GeolocationDenied => format!("{}{}", t.geolocation_failed, t.geolocation_denied),
            Self::GeolocationTimeout => {
                format!("{}{}", t.geolocation_failed, t.geolocation_timeout)
            }
            Self::GeolocationPositionUnavailable => {
                format!("{}{}", t.geolocation_failed, t.geolocation_unavailable)
            }
            Self::GeolocationUnknown => format!("{}{}", t.geolocation_failed, t.geolocation_unknown),
            Self::InsufficientWaypoints => t.need_two_points.to_string(),
            Self::RouteComputationFailed(reason) => format!("{}: {}", t.route_failed, reason),
            Self::GeocodingFailed(reason) => format!("{}: {}", t.search_failed, reason),
            Self::MalformedSessionUrl(value) => format!("{} ({})", t.malformed_place, value),
        }
    }
}

impl From<GeolocationError> for PlannerError {
    fn from(e: GeolocationError) -> Self {
        match e {
            GeolocationError::Unsupported => Self::GeolocationUnavailable,
            GeolocationError::PermissionDenied => Self::GeolocationDenied,
            GeolocationError::PositionUnavailable => Self::GeolocationPositionUnavailable,
            GeolocationError::Timeout => Self::GeolocationTimeout,
            GeolocationError::Unknown => Self::GeolocationUnknown,
        }
    }
}

impl From<RoutingError> for PlannerError {
    fn from(e: RoutingError) -> Self {
        Self::RouteComputationFailed(e.to_string())
    }
}

impl From<GeocodeError> for PlannerError {
    fn from(e: GeocodeError) -> Self {
        Self::GeocodingFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geolocation_messages_are_localized() {
        let err = PlannerError::from(GeolocationError::PermissionDenied);
        assert_eq!(err, PlannerError::GeolocationDenied);
        assert_eq!(
            err.message(Language::Ru),
            "Не удалось определить местоположение: Пользователь отказал в доступе к геолокации"
        );
        assert_eq!(err.message(Language::Zh), "无法获取您的位置：您拒绝了位置访问权限");
    }

    #[test]
    fn test_routing_error_conversion() {
        let err = PlannerError::from(RoutingError::NoRoute("NoRoute".to_string()));
        assert!(matches!(err, PlannerError::RouteComputationFailed(_)));
        assert!(err.message(Language::Zh).starts_with("无法规划路线"));
    }
}
