//! Planner settings: service endpoints and planning defaults.
//!
//! In the browser, settings live in sessionStorage so they survive a reload
//! but not the session. Natively they are read once from the JSON file named
//! by `ROUTE_PLANNER_SETTINGS`, if set.

use crate::geo::LatLng;
use crate::map::TravelMode;
use serde::{Deserialize, Serialize};

/// Environment variable naming a native settings file.
pub const SETTINGS_ENV: &str = "ROUTE_PLANNER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of an OSRM-compatible routing service.
    pub routing_url: String,
    /// Base URL of a Nominatim-compatible geocoder.
    pub geocoder_url: String,
    /// `{s}`/`{z}`/`{x}`/`{y}` template for base-map tiles.
    pub tile_url: String,
    pub travel_mode: TravelMode,
    /// Recompute the route after every change to the waypoints.
    pub auto_route: bool,
    pub default_center: LatLng,
    pub default_zoom: f64,
    /// Font file with CJK glyphs, loaded natively for the Chinese UI.
    pub cjk_font_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            routing_url: "https://router.project-osrm.org".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            travel_mode: TravelMode::Driving,
            auto_route: false,
            default_center: LatLng::new(55.7539, 37.6208),
            default_zoom: 12.0,
            cjk_font_path: None,
        }
    }
}

impl Settings {
    /// sessionStorage key for persisting settings.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "route_planner_settings";

    /// Parse settings JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from sessionStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten())
        else {
            return Self::default();
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from sessionStorage");
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from the file named by [`SETTINGS_ENV`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            return Self::default();
        };

        let json = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to read settings file {}: {}", path, e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Failed to parse settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to sessionStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.session_storage().ok().flatten())
        else {
            return;
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save settings: {:?}", e);
        } else {
            log::debug!("Saved settings to sessionStorage");
        }
    }

    /// Native settings are read-only.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings changed: {:?}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(
            r#"{"routing_url": "http://localhost:5000", "travel_mode": "walking"}"#,
        )
        .unwrap();
        assert_eq!(settings.routing_url, "http://localhost:5000");
        assert_eq!(settings.travel_mode, TravelMode::Walking);
        assert_eq!(settings.geocoder_url, Settings::default().geocoder_url);
        assert!(!settings.auto_route);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            auto_route: true,
            cjk_font_path: Some("/usr/share/fonts/noto.otf".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Settings::from_json("{\"default_zoom\": \"near\"}").is_err());
    }
}
