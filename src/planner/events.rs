//! Notifications the planner emits for the UI layer.

use super::PlannerError;
use crate::i18n::Language;

/// Something the UI should reflect. Drained once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerEvent {
    /// The waypoint list changed (content, length or order).
    WaypointsChanged,
    /// A new route summary is available.
    RouteSummaryUpdated,
    /// The previous route summary was discarded.
    RouteCleared,
    /// The UI language changed.
    LanguageChanged(Language),
    /// The shareable query string changed.
    SessionChanged(String),
    /// Geocoder results for the current search arrived.
    SearchResultsUpdated,
    /// A new geolocation fix was applied.
    UserLocationUpdated,
    /// A recoverable error to show the user.
    Notice(PlannerError),
}
