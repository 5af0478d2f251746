//! Marker and route rendering.
//!
//! Paints map overlays onto the egui canvas.

use super::{LatLng, MapProjection};
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke, Vec2};

/// Renders a pin-shaped marker whose tip sits on `coord`.
///
/// Returns the screen position of the tip, or `None` if off-canvas.
pub fn render_marker(
    painter: &Painter,
    projection: &MapProjection,
    coord: LatLng,
    fill: Color32,
    stroke: Color32,
    label: Option<&str>,
) -> Option<Pos2> {
    if !projection.is_visible(coord.into(), 24.0) {
        return None;
    }

    let tip = projection.geo_to_screen(coord.into());
    let head = tip - Vec2::new(0.0, 14.0);

    painter.line_segment([tip, head], Stroke::new(2.0, stroke));
    painter.circle(head, 7.0, fill, Stroke::new(1.5, stroke));

    if let Some(text) = label {
        painter.text(
            head,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(10.0),
            Color32::WHITE,
        );
    }

    Some(tip)
}

/// Renders the route polyline.
pub fn render_route_line(
    painter: &Painter,
    coords: &[LatLng],
    projection: &MapProjection,
    stroke: Stroke,
) {
    if coords.len() < 2 {
        return;
    }

    let mut points: Vec<Pos2> = Vec::with_capacity(coords.len());
    for coord in coords {
        let pos = projection.geo_to_screen((*coord).into());

        // Skip sub-pixel steps
        if let Some(last) = points.last() {
            if last.distance_sq(pos) < 0.5 {
                continue;
            }
        }
        points.push(pos);
    }

    painter.add(eframe::egui::Shape::line(points, stroke));
}
