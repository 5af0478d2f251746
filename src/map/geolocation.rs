//! Continuous position tracking through the browser Geolocation API.
//!
//! Fixes and errors are forwarded through a channel and applied by the
//! update loop, in the same way as routing and geocoding results.

use super::types::{GeoPosition, GeolocationError};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

pub type GeolocationUpdate = Result<GeoPosition, GeolocationError>;

/// Handle to a running `watchPosition` subscription.
pub struct GeolocationWatch {
    sender: Sender<GeolocationUpdate>,
    receiver: Receiver<GeolocationUpdate>,
    #[cfg(target_arch = "wasm32")]
    active: Option<web::ActiveWatch>,
}

impl Default for GeolocationWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationWatch {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            #[cfg(target_arch = "wasm32")]
            active: None,
        }
    }

    /// Begin watching the device position. A second call while active is a no-op.
    #[cfg(target_arch = "wasm32")]
    pub fn start(&mut self, ctx: egui::Context) {
        if self.active.is_some() {
            return;
        }
        match web::ActiveWatch::start(self.sender.clone(), ctx) {
            Ok(watch) => {
                log::info!("Geolocation watch started");
                self.active = Some(watch);
            }
            Err(e) => {
                let _ = self.sender.send(Err(e));
            }
        }
    }

    /// There is no position source natively.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(&mut self, ctx: egui::Context) {
        let _ = self.sender.send(Err(GeolocationError::Unsupported));
        ctx.request_repaint();
    }

    /// Stop watching. Updates already queued are still delivered.
    pub fn stop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if self.active.take().is_some() {
            log::info!("Geolocation watch stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.active.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    /// Non-blocking check for a position update.
    pub fn try_recv(&self) -> Option<GeolocationUpdate> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{GeoPosition, GeolocationError, GeolocationUpdate};
    use crate::geo::LatLng;
    use eframe::egui;
    use std::sync::mpsc::Sender;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Geolocation, GeolocationPosition, GeolocationPositionError, PositionOptions};

    /// Registered callbacks plus the watch id; clearing happens on drop.
    pub struct ActiveWatch {
        geolocation: Geolocation,
        watch_id: i32,
        _on_position: Closure<dyn FnMut(GeolocationPosition)>,
        _on_error: Closure<dyn FnMut(GeolocationPositionError)>,
    }

    impl ActiveWatch {
        pub fn start(
            sender: Sender<GeolocationUpdate>,
            ctx: egui::Context,
        ) -> Result<Self, GeolocationError> {
            let geolocation = web_sys::window()
                .ok_or(GeolocationError::Unsupported)?
                .navigator()
                .geolocation()
                .map_err(|_| GeolocationError::Unsupported)?;

            let position_sender = sender.clone();
            let position_ctx = ctx.clone();
            let on_position = Closure::wrap(Box::new(move |position: GeolocationPosition| {
                let coords = position.coords();
                let update = GeoPosition {
                    coordinates: LatLng::new(coords.latitude(), coords.longitude()),
                    timestamp_ms: position.timestamp(),
                };
                let _ = position_sender.send(Ok(update));
                position_ctx.request_repaint();
            }) as Box<dyn FnMut(_)>);

            let on_error = Closure::wrap(Box::new(move |error: GeolocationPositionError| {
                let _ = sender.send(Err(GeolocationError::from_code(error.code())));
                ctx.request_repaint();
            }) as Box<dyn FnMut(_)>);

            let options = PositionOptions::new();
            options.set_enable_high_accuracy(true);

            let watch_id = geolocation
                .watch_position_with_error_callback_and_options(
                    on_position.as_ref().unchecked_ref(),
                    Some(on_error.as_ref().unchecked_ref()),
                    &options,
                )
                .map_err(|e| {
                    log::warn!("watchPosition failed: {:?}", e);
                    GeolocationError::Unsupported
                })?;

            Ok(Self {
                geolocation,
                watch_id,
                _on_position: on_position,
                _on_error: on_error,
            })
        }
    }

    impl Drop for ActiveWatch {
        fn drop(&mut self) {
            self.geolocation.clear_watch(self.watch_id);
        }
    }
}
