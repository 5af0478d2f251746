//! Top bar UI: app title, language switch, and status.

use super::Planner;
use crate::i18n::{texts, Language};
use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};
use egui_phosphor::regular as icons;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState, planner: &mut Planner) {
    let t = texts(planner.language());

    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new(format!("{} {}", icons::MAP_TRIFOLD, t.app_title))
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                for language in Language::all() {
                    let selected = planner.language() == *language;
                    if ui
                        .selectable_label(selected, language.native_name())
                        .clicked()
                        && !selected
                    {
                        planner.switch_language(*language);
                    }
                }

                ui.separator();

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}
