use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::models::AggregatedArtist;

/// A trimmed, non-empty place name; the unit handed to the geocoder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaceName(String);

impl PlaceName {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collect the places an artist has played: declared tour locations plus the
/// keys of the date-location relation map.
///
/// Duplicates are removed by exact (case-sensitive) match after trimming.
/// Places come back in first-seen order, but callers should treat the result
/// as a set.
pub fn extract_places(artist: &AggregatedArtist) -> Vec<PlaceName> {
    let mut seen = HashSet::new();

    artist
        .locations
        .iter()
        .chain(artist.dates_locations.keys())
        .filter_map(|raw| PlaceName::parse(raw))
        .filter(|place| seen.insert(place.clone()))
        .collect()
}
