//! In-memory artist catalog
//!
//! The four upstream collections are joined once at startup; afterwards the
//! catalog is shared read-only between request handlers.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    AggregatedArtist, ArtistId, ArtistRecord, DateEntry, LocationEntry, RelationEntry,
};

/// Join the four collections by artist id.
///
/// Output order follows `artists`. Artists without a matching location, date
/// or relation entry get an empty list or map. Artist ids are assumed unique;
/// for the other collections the last entry for an id wins.
pub fn aggregate(
    artists: Vec<ArtistRecord>,
    locations: Vec<LocationEntry>,
    dates: Vec<DateEntry>,
    relations: Vec<RelationEntry>,
) -> Vec<AggregatedArtist> {
    let mut locations_by_id: HashMap<ArtistId, Vec<String>> = locations
        .into_iter()
        .map(|entry| (entry.id, entry.locations))
        .collect();
    let mut dates_by_id: HashMap<ArtistId, Vec<String>> = dates
        .into_iter()
        .map(|entry| (entry.id, entry.dates))
        .collect();
    let mut relations_by_id: HashMap<ArtistId, BTreeMap<String, Vec<String>>> = relations
        .into_iter()
        .map(|entry| (entry.id, entry.dates_locations))
        .collect();

    artists
        .into_iter()
        .map(|artist| {
            let id = artist.id;
            AggregatedArtist {
                locations: locations_by_id.remove(&id).unwrap_or_default(),
                dates: dates_by_id.remove(&id).unwrap_or_default(),
                dates_locations: relations_by_id.remove(&id).unwrap_or_default(),
                artist,
            }
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct Catalog {
    artists: Vec<AggregatedArtist>,
    positions: HashMap<ArtistId, usize>,
}

impl Catalog {
    pub fn new(artists: Vec<AggregatedArtist>) -> Self {
        let positions = artists
            .iter()
            .enumerate()
            .map(|(position, artist)| (artist.id(), position))
            .collect();

        Self { artists, positions }
    }

    pub fn artists(&self) -> &[AggregatedArtist] {
        &self.artists
    }

    pub fn find(&self, id: ArtistId) -> Option<&AggregatedArtist> {
        self.positions.get(&id).map(|&position| &self.artists[position])
    }

    /// Case-insensitive substring match on the artist name
    pub fn search(&self, query: &str) -> Vec<&AggregatedArtist> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.artists.iter().collect();
        }

        self.artists
            .iter()
            .filter(|artist| artist.name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}
