//! Curated landmark catalog.
//!
//! The catalog is embedded at compile time from `assets/landmarks.json` and
//! never changes while the app runs. A landmark's id is its position in the
//! file.

use crate::geo::LatLng;
use crate::i18n::{Language, LocalizedText};
use serde::Deserialize;

static LANDMARKS_JSON: &str = include_str!("../../assets/landmarks.json");

/// Stable identifier of a catalog entry for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandmarkId(pub usize);

/// On-disk shape of a catalog entry.
#[derive(Deserialize)]
struct LandmarkRecord {
    lat: f64,
    lng: f64,
    name: LocalizedText,
    description: LocalizedText,
    #[serde(default)]
    article: Option<LocalizedText>,
}

/// A named point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub id: LandmarkId,
    pub coordinates: LatLng,
    pub name: LocalizedText,
    pub description: LocalizedText,
    /// Optional long-form text shown on demand.
    pub article: Option<LocalizedText>,
}

impl Landmark {
    pub fn name(&self, lang: Language) -> &str {
        self.name.get(lang)
    }
}

/// Immutable, ordered collection of landmarks.
#[derive(Debug, Clone, Default)]
pub struct LandmarkCatalog {
    landmarks: Vec<Landmark>,
}

impl LandmarkCatalog {
    /// Parse a catalog from a JSON array of landmark records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<LandmarkRecord> = serde_json::from_str(json)?;
        let landmarks = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Landmark {
                id: LandmarkId(index),
                coordinates: LatLng::new(record.lat, record.lng),
                name: record.name,
                description: record.description,
                article: record.article,
            })
            .collect();
        Ok(Self { landmarks })
    }

    /// The catalog shipped with the app.
    pub fn builtin() -> Self {
        match Self::from_json(LANDMARKS_JSON) {
            Ok(catalog) => {
                log::info!("Loaded {} landmarks", catalog.len());
                catalog
            }
            Err(e) => {
                log::error!("Failed to parse landmark catalog: {}", e);
                Self::default()
            }
        }
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark located exactly at `coordinates` (both components equal).
    pub fn find_by_coordinates(&self, coordinates: LatLng) -> Option<&Landmark> {
        self.landmarks
            .iter()
            .find(|l| l.coordinates.lat == coordinates.lat && l.coordinates.lng == coordinates.lng)
    }

    /// Landmark whose name equals `text` in any language.
    pub fn find_by_name(&self, text: &str) -> Option<&Landmark> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.landmarks.iter().find(|l| l.name.matches_exact(text))
    }

    /// Landmarks whose name in any language contains `term`, ignoring case.
    ///
    /// An empty term matches everything.
    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Landmark> + 'a {
        let term = term.trim();
        self.landmarks
            .iter()
            .filter(move |l| term.is_empty() || l.name.contains_ignore_case(term))
    }
}
