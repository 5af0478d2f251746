#![warn(clippy::all)]

//! City Route Planner - a landmark explorer and multi-stop route planner.
//!
//! Shows a tile map with a curated set of landmarks, lets the user build an
//! ordered route from landmarks, map clicks, place search and geolocation,
//! asks an external routing service for distance and time, and keeps the
//! plan shareable through the page URL.

mod data;
mod geo;
mod i18n;
mod map;
mod planner;
mod state;
mod ui;

use data::LandmarkCatalog;
use eframe::egui;
use map::{GeolocationError, GeolocationWatch, MapView};
use planner::{PlannerOptions, RoutePlanner};
use state::{url_state, AppState, Settings};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "City Route Planner",
        native_options,
        Box::new(|cc| Ok(Box::new(RoutePlannerApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(RoutePlannerApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct RoutePlannerApp {
    /// UI-only state
    state: AppState,

    /// Planning session driving the egui map
    planner: ui::Planner,

    /// Browser position subscription, started on demand
    geolocation: GeolocationWatch,

    /// Monotonic instant of last URL push (for throttling to ~1/sec).
    last_url_push: web_time::Instant,
}

impl RoutePlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load();

        egui_extras::install_image_loaders(&cc.egui_ctx);
        install_fonts(&cc.egui_ctx, &settings);

        let catalog = LandmarkCatalog::builtin();

        let view = MapView::new(cc.egui_ctx.clone(), &settings);
        let options = PlannerOptions {
            travel_mode: settings.travel_mode,
            auto_route: settings.auto_route,
            ..Default::default()
        };
        let mut planner = RoutePlanner::new(view, catalog, options);

        // Rebuild the plan from a shared link
        let query = url_state::read_query();
        if !query.is_empty() {
            let restored = planner.restore_session(&query);
            log::info!("Session restored with {} place(s)", restored);
        }

        let state = AppState::new(settings, planner.language());

        let mut app = Self {
            state,
            planner,
            geolocation: GeolocationWatch::new(),
            last_url_push: web_time::Instant::now(),
        };
        app.process_events();
        app
    }

    /// Hand finished async work back to the planner.
    fn poll_channels(&mut self) {
        while let Some((token, result)) = self.planner.map().poll_route() {
            self.planner.on_route_result(token, result);
        }

        while let Some((token, result)) = self.planner.map().poll_search() {
            self.planner.on_search_results(token, result);
        }

        while let Some(update) = self.geolocation.try_recv() {
            // The watch cannot recover from these; let the user retry.
            if matches!(
                update,
                Err(GeolocationError::Unsupported | GeolocationError::PermissionDenied)
            ) {
                self.geolocation.stop();
            }
            self.planner.on_geolocation(update);
        }
    }

    /// Fold queued planner events into the UI state.
    fn process_events(&mut self) {
        for event in self.planner.drain_events() {
            log::debug!("Planner event: {:?}", event);
            self.state.apply_event(
                &event,
                self.planner.waypoints(),
                self.planner.route_summary(),
                self.planner.language(),
            );
        }
    }

    /// Write the latest session query to the address bar, at most once per second.
    fn flush_url(&mut self) {
        if self.state.pending_url.is_none() {
            return;
        }
        let now = web_time::Instant::now();
        if now.duration_since(self.last_url_push).as_secs_f64() >= 1.0 {
            self.last_url_push = now;
            if let Some(query) = self.state.pending_url.take() {
                url_state::push_to_url(&query);
            }
        }
    }
}

impl eframe::App for RoutePlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_channels();
        self.process_events();

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.state, &mut self.planner);
        ui::render_left_panel(
            ctx,
            &mut self.state,
            &mut self.planner,
            &mut self.geolocation,
        );
        ui::render_right_panel(ctx, &mut self.state, &mut self.planner);
        ui::render_canvas(ctx, &mut self.state, &mut self.planner);
        ui::render_alert(ctx, &mut self.state, &self.planner);

        // Apply what this frame's interactions changed
        self.process_events();
        self.flush_url();

        if self.state.pending_url.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

/// Icon font plus, natively, an optional CJK font for the Chinese UI.
#[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
fn install_fonts(ctx: &egui::Context, settings: &Settings) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &settings.cjk_font_path {
        match std::fs::read(path) {
            Ok(bytes) => {
                fonts.font_data.insert(
                    "cjk".to_owned(),
                    std::sync::Arc::new(egui::FontData::from_owned(bytes)),
                );
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    fonts.families.entry(family).or_default().push("cjk".to_owned());
                }
                log::info!("Loaded CJK font from {}", path);
            }
            Err(e) => log::warn!("Failed to read CJK font {}: {}", path, e),
        }
    }

    ctx.set_fonts(fonts);
}
