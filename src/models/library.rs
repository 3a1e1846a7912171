use serde::{Deserialize, Serialize};

/// Coarse media kind used to group synced library items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Classify a server-reported media type. Only `show` maps to TV;
    /// everything else (including unknown types) is treated as a movie.
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.eq_ignore_ascii_case("show") {
            MediaKind::Tv
        } else {
            MediaKind::Movie
        }
    }
}

/// A library section (e.g. "Movies", "TV Shows") on the media server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
        }
    }
}

/// An item as reported by the library server, before id resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLibraryEntry {
    pub internal_id: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Server-reported type string (`movie`, `show`, ...).
    pub media_type: String,
}

/// A synced library item, enriched with an external provider id when
/// the lookup succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub kind: MediaKind,
    pub internal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}
