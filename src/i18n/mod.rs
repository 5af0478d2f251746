//! Localization: supported languages, per-language text, and the UI string table.
//!
//! Every user-visible string goes through [`texts`]. Catalog content carries its
//! own per-language text as [`LocalizedText`].

mod texts;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use texts::{texts, Texts};

/// A supported UI language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    Ru,
}

impl Language {
    /// All supported languages in display order.
    pub fn all() -> &'static [Language] {
        &[Language::Zh, Language::Ru]
    }

    /// Code used in the `lang` URL parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::Ru => "ru",
        }
    }

    /// Parse a language code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Label shown on the language switch button.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Zh => "中文",
            Self::Ru => "Русский",
        }
    }
}

/// Text with one variant per language.
///
/// Deserializes from a JSON object keyed by language code, e.g.
/// `{"zh": "红场", "ru": "Красная площадь"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(HashMap<Language, String>);

impl LocalizedText {
    pub fn new(entries: impl IntoIterator<Item = (Language, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Text for `lang`, falling back to the default language, then to any variant.
    pub fn get(&self, lang: Language) -> &str {
        self.0
            .get(&lang)
            .or_else(|| self.0.get(&Language::default()))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True if any language variant equals `text` exactly.
    pub fn matches_exact(&self, text: &str) -> bool {
        self.0.values().any(|v| v == text)
    }

    /// True if any language variant contains `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.0.values().any(|v| v.to_lowercase().contains(&needle))
    }
}

/// Localized label for a free point picked on the map.
pub fn map_point_label(lang: Language, lat: f64, lng: f64) -> String {
    format!("{} ({:.6}, {:.6})", texts(lang).map_point, lat, lng)
}
