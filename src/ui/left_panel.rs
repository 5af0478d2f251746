//! Left panel UI: waypoint rows, route controls, and the route summary.

use super::colors;
use super::Planner;
use crate::i18n::{texts, Texts};
use crate::map::{GeolocationWatch, TravelMode};
use crate::state::{url_state, AppState};
use eframe::egui::{self, RichText, ScrollArea};
use egui_phosphor::regular as icons;

/// Row edits collected while drawing, applied once the list is no longer borrowed.
enum RowAction {
    Resolve(usize, String),
    MoveUp(usize),
    MoveDown(usize),
    Remove(usize),
    AddAfter(usize),
}

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &mut AppState,
    planner: &mut Planner,
    geolocation: &mut GeolocationWatch,
) {
    let t = texts(planner.language());

    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(300.0)
        .min_width(240.0)
        .max_width(420.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(t.route_title);
                ui.separator();

                render_waypoint_rows(ui, state, planner, t);
                ui.add_space(6.0);

                render_route_buttons(ui, state, planner, t);
                ui.add_space(6.0);

                render_route_options(ui, state, planner, t);
                ui.add_space(6.0);

                render_location_section(ui, planner, geolocation, t);
                ui.add_space(6.0);

                render_route_info(ui, planner, t);
                ui.add_space(6.0);

                render_share_section(ui, state, planner, t);
            });
        });
}

/// Marker letter or number shown beside a row.
pub(super) fn row_badge(index: usize, len: usize, t: &Texts) -> String {
    if index == 0 {
        t.start_short.to_string()
    } else if index + 1 == len {
        t.end_short.to_string()
    } else {
        index.to_string()
    }
}

fn render_waypoint_rows(ui: &mut egui::Ui, state: &mut AppState, planner: &mut Planner, t: &Texts) {
    let len = planner.waypoints().len();
    if state.row_texts.len() != len {
        state.sync_rows(planner.waypoints());
    }

    let mut actions = Vec::new();
    for index in 0..len {
        let hint = if index == 0 {
            t.start_placeholder
        } else if index + 1 == len {
            t.end_placeholder
        } else {
            t.stop_placeholder
        };

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(row_badge(index, len, t))
                    .strong()
                    .monospace()
                    .color(colors::ui::ACTIVE),
            );

            let response = ui.add(
                egui::TextEdit::singleline(&mut state.row_texts[index])
                    .hint_text(hint)
                    .desired_width(150.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(RowAction::Resolve(index, state.row_texts[index].clone()));
            }

            if ui
                .add_enabled(index > 0, egui::Button::new(icons::ARROW_UP).small())
                .clicked()
            {
                actions.push(RowAction::MoveUp(index));
            }
            if ui
                .add_enabled(index + 1 < len, egui::Button::new(icons::ARROW_DOWN).small())
                .clicked()
            {
                actions.push(RowAction::MoveDown(index));
            }
            if ui.small_button(icons::X).clicked() {
                actions.push(RowAction::Remove(index));
            }
            if index + 1 < len && ui.small_button(icons::PLUS).on_hover_text(t.add_stop).clicked()
            {
                actions.push(RowAction::AddAfter(index));
            }
        });
    }

    if ui
        .button(format!("{} {}", icons::PLUS, t.add_stop))
        .clicked()
    {
        actions.push(RowAction::AddAfter(len.saturating_sub(2)));
    }

    render_search_results(ui, planner, t);

    apply_row_actions(planner, actions);
}

fn apply_row_actions(planner: &mut Planner, actions: Vec<RowAction>) {
    for action in actions {
        match action {
            RowAction::Resolve(index, text) => planner.resolve_typed(index, &text),
            RowAction::MoveUp(index) => planner.reorder(index, index - 1),
            RowAction::MoveDown(index) => planner.reorder(index, index + 1),
            RowAction::Remove(index) => planner.remove_slot(index),
            RowAction::AddAfter(index) => {
                planner.add_slot_after(index);
            }
        }
    }
}

/// Geocoder candidates for a typed row.
fn render_search_results(ui: &mut egui::Ui, planner: &mut Planner, t: &Texts) {
    if planner.search_slot().is_none() || planner.search_results().is_empty() {
        return;
    }

    let mut chosen = None;
    let mut cancel = false;
    ui.group(|ui| {
        for (index, candidate) in planner.search_results().iter().enumerate() {
            if ui
                .selectable_label(false, format!("{} {}", icons::MAP_PIN, candidate.display_name))
                .clicked()
            {
                chosen = Some(index);
            }
        }
        if ui.small_button(t.dismiss).clicked() {
            cancel = true;
        }
    });

    if let Some(index) = chosen {
        planner.on_search_result(index);
    } else if cancel {
        planner.cancel_search();
    }
}

fn render_route_buttons(ui: &mut egui::Ui, state: &mut AppState, planner: &mut Planner, t: &Texts) {
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} {}", icons::PATH, t.calc_route))
            .clicked()
        {
            let _ = planner.compute_route();
        }
        if ui
            .button(format!("{} {}", icons::TRASH, t.clear_route))
            .clicked()
        {
            planner.clear();
            state.reset_rows(planner.waypoints());
        }
        if planner.is_route_pending() {
            ui.spinner();
            ui.label(RichText::new(t.routing).small().color(colors::ui::LABEL));
        }
    });
}

fn render_route_options(ui: &mut egui::Ui, state: &mut AppState, planner: &mut Planner, t: &Texts) {
    egui::CollapsingHeader::new(RichText::new(t.travel_mode).strong())
        .default_open(true)
        .show(ui, |ui| {
            let mut mode = planner.travel_mode();
            ui.horizontal(|ui| {
                for option in TravelMode::all() {
                    let label = match option {
                        TravelMode::Driving => format!("{} {}", icons::CAR, t.driving),
                        TravelMode::Walking => format!("{} {}", icons::PERSON_SIMPLE_WALK, t.walking),
                    };
                    ui.selectable_value(&mut mode, *option, label);
                }
            });
            if mode != planner.travel_mode() {
                planner.set_travel_mode(mode);
                state.settings.travel_mode = mode;
                state.settings.save();
            }

            let mut auto_route = planner.auto_route();
            if ui.checkbox(&mut auto_route, t.auto_route).changed() {
                planner.set_auto_route(auto_route);
                state.settings.auto_route = auto_route;
                state.settings.save();
            }
        });
}

fn render_location_section(
    ui: &mut egui::Ui,
    planner: &mut Planner,
    geolocation: &mut GeolocationWatch,
    t: &Texts,
) {
    ui.horizontal(|ui| {
        let locate = ui.add_enabled(
            !geolocation.is_active(),
            egui::Button::new(format!("{} {}", icons::CROSSHAIR, t.locate)),
        );
        if locate.clicked() {
            geolocation.start(ui.ctx().clone());
        }

        let has_fix = planner.user_position().is_some();
        if ui
            .add_enabled(
                has_fix,
                egui::Button::new(format!("{} {}", icons::NAVIGATION_ARROW, t.use_my_location)),
            )
            .clicked()
        {
            let _ = planner.use_my_location();
        }
    });
}

fn render_route_info(ui: &mut egui::Ui, planner: &Planner, t: &Texts) {
    let Some(summary) = planner.route_summary() else {
        return;
    };

    ui.group(|ui| {
        ui.label(RichText::new(t.route_info).strong());

        let resolved: Vec<&str> = planner
            .waypoints()
            .iter()
            .filter(|w| w.is_resolved())
            .map(|w| w.display_name.as_str())
            .collect();
        if let (Some(from), Some(to)) = (resolved.first(), resolved.last()) {
            info_row(ui, t.from, from);
            info_row(ui, t.to, to);
        }
        info_row(
            ui,
            t.distance,
            &format!("{} {}", summary.distance_km_label(), t.km),
        );
        info_row(
            ui,
            t.time,
            &format!("{} {}", summary.duration_minutes(), t.min),
        );
    });
}

fn info_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}:", label)).color(colors::ui::LABEL));
        ui.label(RichText::new(value).color(colors::ui::VALUE));
    });
}

fn render_share_section(ui: &mut egui::Ui, state: &mut AppState, planner: &Planner, t: &Texts) {
    ui.horizontal(|ui| {
        if ui
            .button(format!("{} {}", icons::SHARE_NETWORK, t.share_link))
            .clicked()
        {
            let link = url_state::share_link(planner.session_query());
            ui.ctx().copy_text(link);
            state.link_copied = true;
        }
        if state.link_copied {
            ui.label(RichText::new(t.copied).small().color(colors::ui::SUCCESS));
        }
    });
}
