//! Application state management.
//!
//! Planning state lives in [`crate::planner::RoutePlanner`]; this module
//! holds what only the UI needs: editable row texts, filters, the status
//! line and the alert currently shown. [`AppState::apply_event`] folds
//! planner events into it each frame.

mod settings;
pub mod url_state;

pub use settings::Settings;

use crate::data::LandmarkId;
use crate::i18n::{texts, Language};
use crate::map::RouteSummary;
use crate::planner::{PlannerEvent, Waypoint};

/// Root UI state.
#[derive(Default)]
pub struct AppState {
    /// Status message displayed in the top bar
    pub status_message: String,

    /// Text of each waypoint row, edited in place and resolved on Enter
    pub row_texts: Vec<String>,

    /// Waypoints as of the last row sync, to tell which rows changed
    synced_rows: Vec<Waypoint>,

    /// Filter for the landmark list
    pub catalog_filter: String,

    /// Free-text geocoder query
    pub search_input: String,

    /// Message of the alert window, if one is open
    pub alert: Option<String>,

    /// Landmark whose info popup is open
    pub selected_landmark: Option<LandmarkId>,

    /// Landmark whose article is expanded in the side panel
    pub open_article: Option<LandmarkId>,

    /// Latest query not yet written to the address bar
    pub pending_url: Option<String>,

    /// Set when the share link was copied, for a short confirmation
    pub link_copied: bool,

    /// Persisted settings
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings, language: Language) -> Self {
        Self {
            status_message: texts(language).ready.to_string(),
            row_texts: vec![String::new(); crate::planner::MIN_SLOTS],
            synced_rows: vec![Waypoint::default(); crate::planner::MIN_SLOTS],
            settings,
            ..Default::default()
        }
    }

    /// Bring the row texts in line with the planner's waypoints.
    ///
    /// A row whose waypoint is unchanged since the last sync keeps its text,
    /// so typing in one row survives edits elsewhere in the list. Resolved
    /// waypoints carry their text along when rows move.
    pub fn sync_rows(&mut self, waypoints: &[Waypoint]) {
        let row_texts = waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| {
                let previous = if waypoint.is_resolved() {
                    self.synced_rows.iter().position(|p| p == waypoint)
                } else {
                    (self.synced_rows.get(index) == Some(waypoint)).then_some(index)
                };
                previous
                    .and_then(|i| self.row_texts.get(i))
                    .cloned()
                    .unwrap_or_else(|| waypoint.display_name.clone())
            })
            .collect();
        self.row_texts = row_texts;
        self.synced_rows = waypoints.to_vec();
    }

    /// Discard all typed text and show the planner's names.
    pub fn reset_rows(&mut self, waypoints: &[Waypoint]) {
        self.row_texts = waypoints.iter().map(|w| w.display_name.clone()).collect();
        self.synced_rows = waypoints.to_vec();
    }

    /// Fold one planner event into the UI state.
    pub fn apply_event(
        &mut self,
        event: &PlannerEvent,
        waypoints: &[Waypoint],
        summary: Option<&RouteSummary>,
        language: Language,
    ) {
        let t = texts(language);
        match event {
            PlannerEvent::WaypointsChanged => self.sync_rows(waypoints),
            PlannerEvent::LanguageChanged(_) => {
                self.sync_rows(waypoints);
                self.status_message = t.ready.to_string();
                self.alert = None;
            }
            PlannerEvent::RouteSummaryUpdated => {
                if let Some(summary) = summary {
                    self.status_message = format!(
                        "{}: {} {}, {}: {} {}",
                        t.distance,
                        summary.distance_km_label(),
                        t.km,
                        t.time,
                        summary.duration_minutes(),
                        t.min
                    );
                }
            }
            PlannerEvent::RouteCleared => self.status_message = t.ready.to_string(),
            PlannerEvent::SessionChanged(query) => {
                self.pending_url = Some(query.clone());
                self.link_copied = false;
            }
            PlannerEvent::SearchResultsUpdated | PlannerEvent::UserLocationUpdated => {}
            PlannerEvent::Notice(error) => {
                let message = error.message(language);
                self.status_message = format!("{} {}", t.error_prefix, message);
                self.alert = Some(message);
            }
        }
    }
}
