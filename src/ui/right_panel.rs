//! Right panel UI: landmark catalog, place search, and instructions.

use super::colors;
use super::Planner;
use crate::data::LandmarkId;
use crate::i18n::{texts, Texts};
use crate::map::MapAdapter;
use crate::planner::SlotTarget;
use crate::state::AppState;
use eframe::egui::{self, RichText, ScrollArea};
use egui_phosphor::regular as icons;

/// Zoom used when focusing a landmark from the list.
const FOCUS_ZOOM: f64 = 15.0;

pub fn render_right_panel(ctx: &egui::Context, state: &mut AppState, planner: &mut Planner) {
    let t = texts(planner.language());

    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(280.0)
        .min_width(220.0)
        .max_width(420.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                render_catalog_section(ui, state, planner, t);
                ui.add_space(5.0);

                render_place_search_section(ui, state, planner, t);
                ui.add_space(5.0);

                render_article_section(ui, state, planner);
                ui.add_space(5.0);

                render_instructions_section(ui, t);
            });
        });
}

fn render_catalog_section(
    ui: &mut egui::Ui,
    state: &mut AppState,
    planner: &mut Planner,
    t: &Texts,
) {
    egui::CollapsingHeader::new(RichText::new(t.attractions).strong())
        .default_open(true)
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.catalog_filter)
                    .hint_text(format!("{} {}", icons::MAGNIFYING_GLASS, t.search_placeholder)),
            );
            ui.add_space(4.0);

            let language = planner.language();
            let mut picked: Option<(LandmarkId, SlotTarget)> = None;
            let mut focused: Option<LandmarkId> = None;

            let matches: Vec<_> = planner.catalog().search(&state.catalog_filter).collect();
            if matches.is_empty() {
                ui.label(RichText::new(t.no_results).color(colors::ui::LABEL));
            }
            for landmark in matches {
                ui.horizontal(|ui| {
                    let selected = state.selected_landmark == Some(landmark.id);
                    if ui
                        .selectable_label(selected, landmark.name(language))
                        .on_hover_text(landmark.description.get(language))
                        .clicked()
                    {
                        focused = Some(landmark.id);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(icons::PLUS).on_hover_text(t.add_as_stop).clicked() {
                            picked = Some((landmark.id, SlotTarget::Stop));
                        }
                        if ui.small_button(t.end_short).on_hover_text(t.set_as_end).clicked() {
                            picked = Some((landmark.id, SlotTarget::End));
                        }
                        if ui
                            .small_button(t.start_short)
                            .on_hover_text(t.set_as_start)
                            .clicked()
                        {
                            picked = Some((landmark.id, SlotTarget::Start));
                        }
                    });
                });
            }

            if let Some(id) = focused {
                state.selected_landmark = Some(id);
                if let Some(landmark) = planner.catalog().get(id) {
                    let coordinates = landmark.coordinates;
                    planner.map_mut().center_on(coordinates, FOCUS_ZOOM);
                }
            }
            if let Some((id, target)) = picked {
                planner.on_catalog_select(id, target);
            }
        });
}

/// Free-form geocoder search; a chosen hit becomes a new point.
fn render_place_search_section(
    ui: &mut egui::Ui,
    state: &mut AppState,
    planner: &mut Planner,
    t: &Texts,
) {
    egui::CollapsingHeader::new(RichText::new(t.search_places).strong())
        .default_open(true)
        .show(ui, |ui| {
            let mut submit = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_input)
                        .hint_text(t.search_placeholder)
                        .desired_width(170.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if ui.button(icons::MAGNIFYING_GLASS).clicked() {
                    submit = true;
                }
            });
            if submit {
                planner.search(&state.search_input, None);
            }

            // Row lookups are listed beside their row in the left panel.
            if planner.search_slot().is_some() {
                return;
            }

            let mut chosen = None;
            for (index, candidate) in planner.search_results().iter().enumerate() {
                if ui
                    .selectable_label(false, format!("{} {}", icons::MAP_PIN, candidate.display_name))
                    .clicked()
                {
                    chosen = Some(index);
                }
            }
            if let Some(index) = chosen {
                planner.on_search_result(index);
                state.search_input.clear();
            }
        });
}

fn render_article_section(ui: &mut egui::Ui, state: &mut AppState, planner: &Planner) {
    let Some(landmark) = state.open_article.and_then(|id| planner.catalog().get(id)) else {
        return;
    };
    let Some(article) = &landmark.article else {
        return;
    };
    let language = planner.language();

    let mut close = false;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} {}", icons::BOOK_OPEN, landmark.name(language))).strong(),
            );
            if ui.small_button(icons::X).clicked() {
                close = true;
            }
        });
        ui.separator();
        ui.label(article.get(language));
    });

    if close {
        state.open_article = None;
    }
}

fn render_instructions_section(ui: &mut egui::Ui, t: &Texts) {
    egui::CollapsingHeader::new(RichText::new(t.instructions).strong())
        .default_open(false)
        .show(ui, |ui| {
            for (i, line) in t.instructions_list.iter().enumerate() {
                ui.label(RichText::new(format!("{}. {}", i + 1, line)).small());
            }
        });
}
