//! Per-artist geocoding cache
//!
//! Each artist's place set is geocoded at most once per process. Results are
//! never evicted; an artist with no resolvable places caches an empty list.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;

use crate::error::{AppError, Result};
use crate::models::{AggregatedArtist, ArtistId, GeoPoint};
use crate::places::{extract_places, PlaceName};
use crate::services::geocoder::Geocoder;

type Entry = Arc<OnceCell<Arc<Vec<GeoPoint>>>>;

pub struct GeocodeCache {
    geocoder: Arc<dyn Geocoder>,
    entries: Mutex<HashMap<ArtistId, Entry>>,
    batch_budget: Option<Duration>,
}

impl GeocodeCache {
    pub fn new(geocoder: Arc<dyn Geocoder>, batch_budget: Option<Duration>) -> Self {
        Self {
            geocoder,
            entries: Mutex::new(HashMap::new()),
            batch_budget,
        }
    }

    /// Return the cached coordinates for `id`, geocoding the artist's places on
    /// first access.
    ///
    /// The entry is registered before resolution starts, so concurrent callers
    /// for the same artist wait on a single batch instead of starting their own.
    /// The batch fills the entry from its own task; a caller that goes away
    /// mid-batch leaves the resolution running and its result cached.
    pub async fn get_or_resolve(
        &self,
        id: ArtistId,
        artist: &AggregatedArtist,
    ) -> Result<Arc<Vec<GeoPoint>>> {
        let entry = {
            let mut entries = self.entries.lock().await;
            Arc::clone(entries.entry(id).or_default())
        };

        if let Some(points) = entry.get() {
            tracing::debug!(artist_id = id, "Geocode cache hit");
            return Ok(Arc::clone(points));
        }

        let geocoder = Arc::clone(&self.geocoder);
        let places = extract_places(artist);
        let budget = self.batch_budget;

        let task = tokio::spawn(async move {
            let points = entry
                .get_or_init(|| async move {
                    tracing::debug!(artist_id = id, "Geocode cache miss");
                    Arc::new(resolve_batch(geocoder, id, places, budget).await)
                })
                .await;

            Arc::clone(points)
        });

        task.await.map_err(|e| {
            AppError::Internal(format!("Geocoding batch for artist {} failed: {}", id, e))
        })
    }

    /// Number of artists with a completed resolution
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|entry| entry.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, id: ArtistId) -> bool {
        let entries = self.entries.lock().await;
        entries.get(&id).is_some_and(|entry| entry.initialized())
    }
}

/// Geocode every place in turn. Lookups are never parallelized; pacing is the
/// geocoder's concern. Misses and failures are logged and left out.
async fn resolve_batch(
    geocoder: Arc<dyn Geocoder>,
    id: ArtistId,
    places: Vec<PlaceName>,
    budget: Option<Duration>,
) -> Vec<GeoPoint> {
    let started = Instant::now();
    let mut points = Vec::with_capacity(places.len());

    tracing::info!(artist_id = id, places = places.len(), "Geocoding artist places");

    for (attempted, place) in places.iter().enumerate() {
        if let Some(budget) = budget {
            if started.elapsed() >= budget {
                tracing::warn!(
                    artist_id = id,
                    skipped = places.len() - attempted,
                    "Geocoding budget of {:?} exhausted",
                    budget
                );
                break;
            }
        }

        match geocoder.resolve(place).await {
            Ok(Some(point)) => points.push(point),
            Ok(None) => tracing::debug!(artist_id = id, "No geocoding match for {:?}", place.as_str()),
            Err(e) => tracing::warn!(artist_id = id, "Geocoding failed for {:?}: {}", place.as_str(), e),
        }
    }

    tracing::info!(
        artist_id = id,
        resolved = points.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Geocoding batch complete"
    );

    points
}
