//! Static datasets.
//!
//! - `landmarks`: the curated points of interest shown on the map

pub mod landmarks;

pub use landmarks::{Landmark, LandmarkCatalog, LandmarkId};
