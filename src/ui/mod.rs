//! UI modules for the route planner.
//!
//! The UI is split into distinct panels:
//! - Top bar: title, language switch and status
//! - Left panel: waypoint rows, route controls and summary
//! - Right panel: landmark catalog, place search and instructions
//! - Central canvas: tile map with markers and the route line
//!
//! Panels read planner state directly and call its operations; planner
//! events are folded into [`crate::state::AppState`] by the app afterwards.

mod canvas;
pub mod colors;
mod left_panel;
mod right_panel;
mod top_bar;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;

use crate::i18n::texts;
use crate::map::MapView;
use crate::planner::RoutePlanner;
use crate::state::AppState;
use eframe::egui::{self, RichText};

/// The planner as driven by the egui app.
pub type Planner = RoutePlanner<MapView>;

/// Dismissable window for the latest notice.
pub fn render_alert(ctx: &egui::Context, state: &mut AppState, planner: &Planner) {
    let Some(message) = state.alert.clone() else {
        return;
    };
    let t = texts(planner.language());

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(RichText::new(t.app_title).strong())
        .id(egui::Id::new("alert_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 48.0))
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(RichText::new(message).color(colors::ui::ERROR));
            ui.add_space(6.0);
            if ui.button(t.dismiss).clicked() {
                dismissed = true;
            }
        });

    if !open || dismissed {
        state.alert = None;
    }
}
