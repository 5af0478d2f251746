//! Routing engine client.
//!
//! Talks to an OSRM-compatible HTTP service. Requests run off the UI loop
//! and results come back through a channel polled once per frame.

use super::types::{RouteRequest, RouteSummary, RouteToken, RoutingError};
use crate::geo::LatLng;
use crate::i18n::Language;
use eframe::egui;
use reqwest::header::ACCEPT_LANGUAGE;
use serde::Deserialize;
use std::sync::mpsc::{channel, Receiver, Sender};

/// A finished route request, tagged with the token it was issued under.
pub type RouteResult = (RouteToken, Result<RouteSummary, RoutingError>);

/// Channel-based routing client.
///
/// egui's update() is synchronous, so each request runs on its own task
/// and posts its result here.
pub struct RoutingChannel {
    base_url: String,
    sender: Sender<RouteResult>,
    receiver: Receiver<RouteResult>,
}

impl RoutingChannel {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (sender, receiver) = channel();
        Self {
            base_url: base_url.into(),
            sender,
            receiver,
        }
    }

    /// Spawns a route request on the browser's event loop.
    #[cfg(target_arch = "wasm32")]
    pub fn request(&self, ctx: egui::Context, request: RouteRequest) {
        let sender = self.sender.clone();
        let url = route_url(&self.base_url, &request);
        log::debug!("Route request ({}): {}", request.language.code(), url);

        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_route(&url, request.language).await;
            let _ = sender.send((request.token, result));
            ctx.request_repaint();
        });
    }

    /// Native request on a worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn request(&self, ctx: egui::Context, request: RouteRequest) {
        let sender = self.sender.clone();
        let url = route_url(&self.base_url, &request);
        log::debug!("Route request ({}): {}", request.language.code(), url);

        std::thread::spawn(move || {
            let result = fetch_route_blocking(&url, request.language);
            let _ = sender.send((request.token, result));
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a completed request.
    pub fn try_recv(&self) -> Option<RouteResult> {
        self.receiver.try_recv().ok()
    }
}

/// `{base}/route/v1/{profile}/{lng},{lat};...` with full GeoJSON geometry.
pub fn route_url(base_url: &str, request: &RouteRequest) -> String {
    let points = request
        .coordinates
        .iter()
        .map(|p| format!("{},{}", p.lng, p.lat))
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "{}/route/v1/{}/{}?overview=full&geometries=geojson",
        base_url.trim_end_matches('/'),
        request.mode.profile(),
        points
    )
}

#[cfg(target_arch = "wasm32")]
async fn fetch_route(url: &str, language: Language) -> Result<RouteSummary, RoutingError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(ACCEPT_LANGUAGE, language.code())
        .send()
        .await
        .map_err(|e| RoutingError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() && status.as_u16() != 400 {
        return Err(RoutingError::Status(status.as_u16()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| RoutingError::Transport(e.to_string()))?;
    parse_route_response(&body)
}

/// Build the HTTP request for a route. Waypoint names and any error text
/// the engine returns follow the UI language.
#[cfg(not(target_arch = "wasm32"))]
fn blocking_route_request(
    client: &reqwest::blocking::Client,
    url: &str,
    language: Language,
) -> reqwest::Result<reqwest::blocking::Request> {
    client
        .get(url)
        .header(ACCEPT_LANGUAGE, language.code())
        .build()
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_route_blocking(url: &str, language: Language) -> Result<RouteSummary, RoutingError> {
    let client = reqwest::blocking::Client::new();
    let response = blocking_route_request(&client, url, language)
        .and_then(|request| client.execute(request))
        .map_err(|e| RoutingError::Transport(e.to_string()))?;
    let status = response.status();
    // OSRM reports "no route" style failures as 400 with a JSON body.
    if !status.is_success() && status.as_u16() != 400 {
        return Err(RoutingError::Status(status.as_u16()));
    }
    let body = response
        .text()
        .map_err(|e| RoutingError::Transport(e.to_string()))?;
    parse_route_response(&body)
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// `[lng, lat]` pairs
    coordinates: Vec<[f64; 2]>,
}

/// Decode an OSRM route response, taking the first (best) route.
pub fn parse_route_response(body: &str) -> Result<RouteSummary, RoutingError> {
    let response: OsrmResponse =
        serde_json::from_str(body).map_err(|e| RoutingError::Decode(e.to_string()))?;

    if response.code != "Ok" {
        let reason = response.message.unwrap_or(response.code);
        return Err(RoutingError::NoRoute(reason));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::NoRoute("empty route list".to_string()))?;

    Ok(RouteSummary {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry: route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| LatLng::new(lat, lng))
            .collect(),
    })
}
