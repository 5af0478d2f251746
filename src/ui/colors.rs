//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for secondary labels.
    pub const LABEL: Color32 = Color32::from_rgb(120, 120, 130);
    /// Slightly brighter for values.
    pub const VALUE: Color32 = Color32::from_rgb(170, 170, 180);
    /// Emphasized color for active states.
    pub const ACTIVE: Color32 = Color32::from_rgb(100, 180, 255);
    /// Success/positive indicator.
    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    /// Error text.
    pub const ERROR: Color32 = Color32::from_rgb(255, 110, 100);
}

/// Colors for the map canvas.
pub mod canvas {
    use super::Color32;

    /// Background shown under missing tiles.
    pub const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 35);
    /// Attribution/overlay text.
    pub const OVERLAY_TEXT: Color32 = Color32::from_rgb(200, 200, 220);
    /// Route polyline.
    pub const ROUTE: Color32 = Color32::from_rgb(60, 130, 240);
    /// Outline drawn under the route polyline.
    pub const ROUTE_CASING: Color32 = Color32::from_rgb(20, 50, 110);
}

/// Marker fills by role.
pub mod marker {
    use super::Color32;

    pub const LANDMARK: Color32 = Color32::from_rgb(230, 150, 40);
    pub const START: Color32 = Color32::from_rgb(60, 170, 80);
    pub const END: Color32 = Color32::from_rgb(220, 60, 60);
    pub const STOP: Color32 = Color32::from_rgb(70, 120, 220);
    pub const USER: Color32 = Color32::from_rgb(40, 160, 230);
    /// Outline for all markers.
    pub const OUTLINE: Color32 = Color32::from_rgb(30, 30, 30);
}
