//! Central canvas UI: tile map, markers, route line, and landmark popup.

use super::colors;
use super::left_panel::row_badge;
use super::Planner;
use crate::data::LandmarkId;
use crate::geo::{render_marker, render_route_line, visible_tiles, LatLng};
use crate::i18n::{texts, Texts};
use crate::map::{MarkerHandle, MarkerStyle};
use crate::planner::SlotTarget;
use crate::state::AppState;
use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use std::collections::HashMap;

/// Zoom levels per scroll pixel.
const SCROLL_ZOOM_RATE: f64 = 0.002;

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, planner: &mut Planner) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
            let rect = response.rect;

            planner.map_mut().projection.update(rect);
            painter.rect_filled(rect, 0.0, colors::canvas::BACKGROUND);

            render_tiles(ui, planner);
            render_route(&painter, planner);
            render_markers(&painter, planner, texts(planner.language()));
            draw_attribution(&painter, rect);

            handle_canvas_interaction(&response, state, planner);
        });

    render_landmark_popup(ctx, state, planner);
}

fn render_tiles(ui: &egui::Ui, planner: &Planner) {
    let view = planner.map();
    for (tile, tile_rect) in visible_tiles(&view.projection) {
        egui::Image::from_uri(tile.url(view.tile_url())).paint_at(ui, tile_rect);
    }
}

fn render_route(painter: &egui::Painter, planner: &Planner) {
    let view = planner.map();
    let route = view.route();
    render_route_line(
        painter,
        route,
        &view.projection,
        Stroke::new(7.0, colors::canvas::ROUTE_CASING),
    );
    render_route_line(
        painter,
        route,
        &view.projection,
        Stroke::new(4.0, colors::canvas::ROUTE),
    );
}

fn render_markers(painter: &egui::Painter, planner: &Planner, t: &Texts) {
    let waypoints = planner.waypoints();
    let len = waypoints.len();
    let order: HashMap<MarkerHandle, usize> = waypoints
        .iter()
        .enumerate()
        .filter_map(|(i, w)| w.marker().map(|m| (m, i)))
        .collect();

    let view = planner.map();
    for (handle, marker) in view.markers() {
        let (fill, label) = match marker.style {
            MarkerStyle::Landmark => (colors::marker::LANDMARK, None),
            MarkerStyle::UserLocation => (colors::marker::USER, None),
            MarkerStyle::Waypoint => {
                let index = order.get(&handle).copied().unwrap_or(0);
                let fill = if index == 0 {
                    colors::marker::START
                } else if index + 1 == len {
                    colors::marker::END
                } else {
                    colors::marker::STOP
                };
                (fill, Some(row_badge(index, len, t)))
            }
        };
        render_marker(
            painter,
            &view.projection,
            marker.coordinates,
            fill,
            colors::marker::OUTLINE,
            label.as_deref(),
        );
    }
}

fn draw_attribution(painter: &egui::Painter, rect: Rect) {
    painter.text(
        rect.right_bottom() - Vec2::new(6.0, 4.0),
        egui::Align2::RIGHT_BOTTOM,
        "© OpenStreetMap contributors",
        egui::FontId::proportional(10.0),
        colors::canvas::OVERLAY_TEXT,
    );
}

fn handle_canvas_interaction(response: &egui::Response, state: &mut AppState, planner: &mut Planner) {
    if response.dragged() {
        planner.map_mut().projection.pan_by(response.drag_delta());
    }

    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            if let Some(anchor) = response.hover_pos() {
                planner
                    .map_mut()
                    .projection
                    .zoom_around(scroll_delta.y as f64 * SCROLL_ZOOM_RATE, anchor);
            }
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            handle_click(pos, state, planner);
        }
    }
}

/// A click on a landmark marker opens its popup; anywhere else adds a point.
fn handle_click(pos: Pos2, state: &mut AppState, planner: &mut Planner) {
    let landmark = planner
        .map()
        .marker_at(pos)
        .and_then(|handle| planner.landmark_for_marker(handle));

    match landmark {
        Some(id) => state.selected_landmark = Some(id),
        None => {
            let coordinates: LatLng = planner.map().projection.screen_to_geo(pos).into();
            state.selected_landmark = None;
            planner.on_map_click(coordinates);
        }
    }
}

fn render_landmark_popup(ctx: &egui::Context, state: &mut AppState, planner: &mut Planner) {
    let Some(id) = state.selected_landmark else {
        return;
    };
    let Some(landmark) = planner.catalog().get(id) else {
        state.selected_landmark = None;
        return;
    };
    let language = planner.language();
    let t = texts(language);

    let anchor = planner
        .map()
        .projection
        .geo_to_screen(landmark.coordinates.into());

    let mut open = true;
    let mut picked: Option<SlotTarget> = None;
    let mut show_article: Option<LandmarkId> = None;

    egui::Window::new(RichText::new(landmark.name(language)).strong())
        .id(egui::Id::new("landmark_popup"))
        .collapsible(false)
        .resizable(false)
        .default_width(240.0)
        .fixed_pos(anchor + Vec2::new(12.0, -24.0))
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(landmark.description.get(language));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button(t.set_as_start).clicked() {
                    picked = Some(SlotTarget::Start);
                }
                if ui.button(t.set_as_end).clicked() {
                    picked = Some(SlotTarget::End);
                }
                if ui.button(t.add_as_stop).clicked() {
                    picked = Some(SlotTarget::Stop);
                }
            });
            if landmark.article.is_some()
                && ui
                    .link(RichText::new(egui_phosphor::regular::BOOK_OPEN).color(Color32::LIGHT_BLUE))
                    .clicked()
            {
                show_article = Some(id);
            }
        });

    if let Some(target) = picked {
        planner.on_catalog_select(id, target);
        open = false;
    }
    if show_article.is_some() {
        state.open_article = show_article;
    }
    if !open {
        state.selected_landmark = None;
    }
}
