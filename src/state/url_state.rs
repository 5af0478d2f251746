//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes the UI language and every resolved waypoint, in route order, in
//! the URL query string so reloading restores the plan and URLs can be shared:
//!
//! ```text
//! ?lang=ru&place=55.7539,37.6208&place=55.8,37.7
//! ```

use crate::geo::LatLng;
use crate::i18n::Language;

/// Parsed URL parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionParams {
    /// `None` when absent or not a supported language code.
    pub language: Option<Language>,
    /// Valid `place` values in the order they appeared.
    pub places: Vec<LatLng>,
    /// Raw `place` values that could not be parsed.
    pub malformed: Vec<String>,
}

/// Build the query string for `language` and the resolved entries of
/// `coordinates`; `None` entries (unresolved slots) are dropped.
pub fn encode(language: Language, coordinates: impl IntoIterator<Item = Option<LatLng>>) -> String {
    let mut query = format!("?lang={}", language.code());
    for point in coordinates.into_iter().flatten() {
        // `{}` on f64 is the shortest representation that parses back exactly.
        query.push_str(&format!("&place={},{}", point.lat, point.lng));
    }
    query
}

/// Parse a query string. Unknown keys are ignored and malformed `place`
/// values are collected rather than failing the whole parse.
pub fn decode(query: &str) -> SessionParams {
    let mut params = SessionParams::default();

    let query = query.trim().trim_start_matches('?');
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        let value = kv.next().unwrap_or("");
        match key {
            "lang" => {
                if let Some(lang) = Language::from_code(value) {
                    params.language = Some(lang);
                }
            }
            "place" => match parse_place(value) {
                Some(point) => params.places.push(point),
                None => params.malformed.push(value.to_string()),
            },
            _ => {}
        }
    }

    params
}

/// Parse `"<lat>,<lng>"`, accepting a percent-encoded comma.
fn parse_place(value: &str) -> Option<LatLng> {
    let value = value.replace("%2C", ",").replace("%2c", ",");
    let (lat, lng) = value.split_once(',')?;
    let point = LatLng::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?);
    point.is_valid().then_some(point)
}

/// Read the query string from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn read_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Natively, the first command-line argument may carry a shared query string.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_query() -> String {
    std::env::args()
        .nth(1)
        .map(|arg| match arg.split_once('?') {
            Some((_, query)) => query.to_string(),
            None => arg,
        })
        .unwrap_or_default()
}

/// Push the query string to the address bar using `replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    // An empty query would keep the old one; point at the bare path instead.
    let target = if query.is_empty() {
        window.location().pathname().unwrap_or_default()
    } else {
        query.to_string()
    };
    if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&target))
    {
        log::warn!("Failed to update URL: {:?}", e);
    }
}

/// Natively there is no address bar; the shareable query is logged.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(query: &str) {
    log::debug!("Session query: {}", query);
}

/// Absolute shareable link for the query, when a page origin is known.
#[cfg(target_arch = "wasm32")]
pub fn share_link(query: &str) -> String {
    let Some(window) = web_sys::window() else {
        return query.to_string();
    };
    let location = window.location();
    let origin = location.origin().unwrap_or_default();
    let path = location.pathname().unwrap_or_default();
    format!("{}{}{}", origin, path, query)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn share_link(query: &str) -> String {
    query.to_string()
}
