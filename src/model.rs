// Domain records — the mural and artist catalogs plus the first-screen asset manifest.

use serde::Deserialize;

/// Which remote collection a fetch targets. Keys the at-most-one-in-flight rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Murals,
    Artists,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Murals => write!(f, "murals"),
            ContentKind::Artists => write!(f, "artists"),
        }
    }
}

/// One mural record as served by the backend.
///
/// Immutable once fetched; a re-fetch replaces the whole collection.
/// The wire format uses the backend's capitalized field names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mural {
    #[serde(rename = "uuid")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Medium", default)]
    pub medium: String,
    #[serde(rename = "Month", default)]
    pub month: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Photo")]
    pub photo_url: String,
    #[serde(rename = "Lat")]
    pub latitude: f64,
    #[serde(rename = "Long")]
    pub longitude: f64,
    /// Weak reference to the artist record; relation and lookup only.
    #[serde(rename = "Artist")]
    pub artist_id: String,
    /// Position in the tour sequence (1-based on the wire).
    #[serde(rename = "Index")]
    pub index: u32,
}

/// One artist record as served by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artist {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub link: String,
}

/// One first-screen asset that must resolve before the interactive UI is shown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetHandle {
    pub name: String,
    pub url: String,
}
