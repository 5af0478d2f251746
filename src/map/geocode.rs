//! Place-name lookup against a Nominatim-compatible geocoder.

use super::types::{GeocodeCandidate, GeocodeError, GeocodeRequest, SearchToken};
use crate::geo::LatLng;
use eframe::egui;
use reqwest::Url;
use serde::Deserialize;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Candidates kept per lookup.
const RESULT_LIMIT: usize = 8;

pub type GeocodeResult = (SearchToken, Result<Vec<GeocodeCandidate>, GeocodeError>);

/// Channel-based geocoder client, polled from the update loop.
pub struct GeocodeChannel {
    base_url: String,
    sender: Sender<GeocodeResult>,
    receiver: Receiver<GeocodeResult>,
}

impl GeocodeChannel {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (sender, receiver) = channel();
        Self {
            base_url: base_url.into(),
            sender,
            receiver,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn request(&self, ctx: egui::Context, request: GeocodeRequest) {
        let sender = self.sender.clone();
        let url = search_url(&self.base_url, &request);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match url {
                Ok(url) => fetch_candidates(url).await,
                Err(e) => Err(e),
            };
            let _ = sender.send((request.token, result));
            ctx.request_repaint();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn request(&self, ctx: egui::Context, request: GeocodeRequest) {
        let sender = self.sender.clone();
        let url = search_url(&self.base_url, &request);

        std::thread::spawn(move || {
            let result = url.and_then(fetch_candidates_blocking);
            let _ = sender.send((request.token, result));
            ctx.request_repaint();
        });
    }

    pub fn try_recv(&self) -> Option<GeocodeResult> {
        self.receiver.try_recv().ok()
    }
}

/// `{base}/search?q=..&format=json&accept-language=..&limit=..`
pub fn search_url(base_url: &str, request: &GeocodeRequest) -> Result<Url, GeocodeError> {
    let endpoint = format!("{}/search", base_url.trim_end_matches('/'));
    let limit = RESULT_LIMIT.to_string();
    Url::parse_with_params(
        &endpoint,
        &[
            ("q", request.query.as_str()),
            ("format", "json"),
            ("accept-language", request.language.code()),
            ("limit", limit.as_str()),
        ],
    )
    .map_err(|e| GeocodeError::Transport(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_candidates(url: Url) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| GeocodeError::Transport(e.to_string()))?;
    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status().as_u16()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| GeocodeError::Transport(e.to_string()))?;
    parse_search_response(&body)
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_candidates_blocking(url: Url) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    // Nominatim's usage policy requires an identifying User-Agent.
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GeocodeError::Transport(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| GeocodeError::Transport(e.to_string()))?;
    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status().as_u16()));
    }
    let body = response
        .text()
        .map_err(|e| GeocodeError::Transport(e.to_string()))?;
    parse_search_response(&body)
}

#[derive(Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Decode a Nominatim JSON result list. Entries with unparseable or
/// out-of-range coordinates are skipped.
pub fn parse_search_response(body: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Decode(e.to_string()))?;

    Ok(places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.parse().ok()?;
            let lng = place.lon.parse().ok()?;
            let coordinates = LatLng::new(lat, lng);
            coordinates.is_valid().then(|| GeocodeCandidate {
                display_name: place.display_name,
                coordinates,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_search_url_encodes_query() {
        let request = GeocodeRequest {
            token: SearchToken(3),
            slot: None,
            query: "Тверская 1 & co".to_string(),
            language: Language::Ru,
        };
        let url = search_url("https://geo.example.org/", &request).unwrap();
        assert_eq!(url.path(), "/search");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("q".to_string(), "Тверская 1 & co".to_string())));
        assert!(pairs.contains(&("accept-language".to_string(), "ru".to_string())));
        assert!(pairs.contains(&("format".to_string(), "json".to_string())));
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"[
            {"place_id": 1, "display_name": "Tverskaya, Moscow", "lat": "55.7601", "lon": "37.6101"},
            {"place_id": 2, "display_name": "Broken", "lat": "n/a", "lon": "37.0"}
        ]"#;
        let candidates = parse_search_response(body).unwrap();
        assert_eq!(
            candidates,
            vec![GeocodeCandidate {
                display_name: "Tverskaya, Moscow".to_string(),
                coordinates: LatLng::new(55.7601, 37.6101),
            }]
        );
    }

    #[test]
    fn test_parse_search_empty_and_invalid() {
        assert_eq!(parse_search_response("[]").unwrap(), vec![]);
        assert!(matches!(
            parse_search_response("{\"error\": 1}"),
            Err(GeocodeError::Decode(_))
        ));
    }
}
