//! Route planning core.
//!
//! The planner owns the ordered waypoint list and everything derived from
//! it: markers, the route summary, the shareable query and the UI language.
//! It talks to the map only through [`crate::map::MapAdapter`], so it runs
//! the same under egui and in tests.

mod commands;
mod error;
mod events;
mod session;
mod waypoints;

#[cfg(test)]
mod tests;

pub use commands::SlotTarget;
pub use error::PlannerError;
pub use events::PlannerEvent;
pub use session::{PlannerOptions, RoutePlanner};
pub use waypoints::{Waypoint, MIN_SLOTS};
