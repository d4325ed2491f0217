//! Test utilities for Groupie Tracker
//!
//! Provides helpers for creating isolated test environments with:
//! - A stub geocoder that counts its calls
//! - AppState factories backed by an in-memory catalog
//! - Test data generators for the upstream collections

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    catalog::{aggregate, Catalog},
    config::{Config, GeocoderConfig},
    error::{AppError, Result},
    models::{
        AggregatedArtist, ArtistId, ArtistRecord, DateEntry, GeoPoint, LocationEntry,
        RelationEntry,
    },
    places::PlaceName,
    services::{GeocodeCache, Geocoder},
    state::AppState,
};

/// Geocoder that answers from a fixed table and counts every lookup
#[derive(Debug, Default)]
pub struct StubGeocoder {
    points: HashMap<String, (f64, f64)>,
    failing: HashSet<String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn new(points: &[(&str, f64, f64)]) -> Self {
        Self {
            points: points
                .iter()
                .map(|&(place, lat, lon)| (place.to_string(), (lat, lon)))
                .collect(),
            ..Self::default()
        }
    }

    /// Make lookups for `place` fail as a transport error would
    pub fn failing_on(mut self, place: &str) -> Self {
        self.failing.insert(place.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, place: &PlaceName) -> Result<Option<GeoPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing.contains(place.as_str()) {
            return Err(AppError::ExternalApi(format!("stub failure for {}", place)));
        }

        Ok(self.points.get(place.as_str()).map(|&(lat, lon)| GeoPoint {
            location: place.to_string(),
            lat,
            lon,
        }))
    }
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 8000,
        upstream_api_base: "http://127.0.0.1:9/api".to_string(),
        static_dir: "static".to_string(),
        geocoder: GeocoderConfig {
            user_agent: "groupie-tracker-tests/0.1".to_string(),
            pacing: Duration::from_millis(1),
            ..GeocoderConfig::default()
        },
    }
}

/// Create a test AppState over `artists`, geocoding through `geocoder`
pub fn setup_test_app_state(
    artists: Vec<AggregatedArtist>,
    geocoder: Arc<dyn Geocoder>,
) -> AppState {
    AppState::new(
        Catalog::new(artists),
        GeocodeCache::new(geocoder, None),
        test_config(),
    )
}

// ============================================================================
// Test Data Factories
// ============================================================================

pub fn artist_record(id: ArtistId, name: &str) -> ArtistRecord {
    ArtistRecord {
        id,
        name: name.to_string(),
        image: format!("https://images.example.com/{}.jpeg", id),
        members: vec![format!("{} Member", name)],
        creation_date: 1970,
        first_album: "14-12-1973".to_string(),
        relations: format!("https://api.example.com/relation/{}", id),
    }
}

pub fn location_entry(id: ArtistId, locations: &[&str]) -> LocationEntry {
    LocationEntry {
        id,
        locations: locations.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn date_entry(id: ArtistId, dates: &[&str]) -> DateEntry {
    DateEntry {
        id,
        dates: dates.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn relation_entry(id: ArtistId, relations: Vec<(&str, Vec<&str>)>) -> RelationEntry {
    RelationEntry {
        id,
        dates_locations: dates_by_place(relations),
    }
}

/// Build an aggregated artist directly, bypassing the upstream collections
pub fn aggregated_artist(
    id: ArtistId,
    locations: &[&str],
    relations: Vec<(&str, Vec<&str>)>,
) -> AggregatedArtist {
    let dates_locations = dates_by_place(relations);
    let dates = dates_locations.values().flatten().cloned().collect();

    AggregatedArtist {
        artist: artist_record(id, &format!("Artist {}", id)),
        locations: locations.iter().map(|s| s.to_string()).collect(),
        dates,
        dates_locations,
    }
}

/// A small catalog: Queen with a full tour, Pink Floyd with no tour data
pub fn sample_artists() -> Vec<AggregatedArtist> {
    aggregate(
        vec![artist_record(1, "Queen"), artist_record(2, "Pink Floyd")],
        vec![location_entry(1, &["paris", "london"])],
        vec![date_entry(1, &["*01-01-2020", "02-01-2020"])],
        vec![relation_entry(
            1,
            vec![("paris", vec!["01-01-2020"]), ("london", vec!["02-01-2020"])],
        )],
    )
}

fn dates_by_place(relations: Vec<(&str, Vec<&str>)>) -> BTreeMap<String, Vec<String>> {
    relations
        .into_iter()
        .map(|(place, dates)| {
            (
                place.to_string(),
                dates.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}
