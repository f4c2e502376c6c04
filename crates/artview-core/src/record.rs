//! Artwork records as returned by the collection API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder shown for any attribute the API left out.
pub const MISSING: &str = "N/A";

/// Opaque unique identifier of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(pub u64);

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single artwork. Immutable once fetched.
///
/// Every display attribute is optional; `null` in the payload and a missing
/// key both deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Artwork {
    /// Minimal record with only an id, mostly useful for tests and mocks.
    pub fn with_id(id: u64) -> Self {
        Self {
            id: ArtworkId(id),
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    pub fn title_display(&self) -> &str {
        text_or_missing(self.title.as_deref())
    }

    pub fn place_display(&self) -> &str {
        text_or_missing(self.place_of_origin.as_deref())
    }

    pub fn artist_display_text(&self) -> &str {
        text_or_missing(self.artist_display.as_deref())
    }

    pub fn inscriptions_display(&self) -> &str {
        text_or_missing(self.inscriptions.as_deref())
    }

    pub fn date_start_display(&self) -> String {
        year_or_missing(self.date_start)
    }

    pub fn date_end_display(&self) -> String {
        year_or_missing(self.date_end)
    }
}

/// Empty strings count as missing, integer dates only when absent (a year of
/// 0 is still a year).
fn text_or_missing(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => MISSING,
    }
}

fn year_or_missing(value: Option<i64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |y| y.to_string())
}

/// Pagination block of the API envelope. Only `total` is consumed, and it is
/// required: bulk targets saturate against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
}

/// One page of artworks plus the collection-wide total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkPage {
    #[serde(default)]
    pub data: Vec<Artwork>,
    pub pagination: Pagination,
}

impl ArtworkPage {
    pub fn total(&self) -> u64 {
        self.pagination.total
    }
}
