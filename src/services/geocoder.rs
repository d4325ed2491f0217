use async_trait::async_trait;
use governor::{clock::DefaultClock, state::direct::NotKeyed, state::InMemoryState, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::GeocoderConfig;
use crate::error::{AppError, Result};
use crate::models::GeoPoint;
use crate::places::PlaceName;

/// Resolves a single place name to coordinates.
///
/// `Ok(None)` means the service knows no such place; `Err` is a transport or
/// decode failure. Either way the caller skips the place.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, place: &PlaceName) -> Result<Option<GeoPoint>>;
}

/// Coordinates arrive as JSON numbers from some deployments and as numeric
/// strings from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(raw) => raw.trim().parse::<f64>().ok(),
        };

        value.filter(|value| value.is_finite())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    lat: Coordinate,
    lon: Coordinate,
}

/// Pick the first candidate with usable coordinates. Candidates that fail to
/// decode are skipped individually.
pub fn parse_candidates(place: &PlaceName, candidates: Vec<serde_json::Value>) -> Option<GeoPoint> {
    candidates.into_iter().find_map(|raw| {
        let candidate: Candidate = match serde_json::from_value(raw) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::debug!("Skipping malformed candidate for {:?}: {}", place.as_str(), e);
                return None;
            }
        };

        match (candidate.lat.value(), candidate.lon.value()) {
            (Some(lat), Some(lon)) => Some(GeoPoint {
                location: place.to_string(),
                lat,
                lon,
            }),
            _ => {
                tracing::debug!("Skipping candidate for {:?}: unparseable coordinates", place.as_str());
                None
            }
        }
    })
}

/// Geocoder backed by a Nominatim-compatible search endpoint
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    search_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            return Err(AppError::Configuration(
                "Geocoder user agent must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        // One lookup per pacing interval, shared by every batch in the process
        let quota = Quota::with_period(config.pacing)
            .ok_or_else(|| {
                AppError::Configuration("Geocoder pacing must be greater than zero".to_string())
            })?
            .allow_burst(nonzero!(1u32));

        Ok(Self {
            client,
            search_url: config.url.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, place: &PlaceName) -> Result<Option<GeoPoint>> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "{}?q={}&format=json&limit=1",
            self.search_url,
            urlencoding::encode(place.as_str())
        );

        tracing::debug!("Geocoding {:?}", place.as_str());

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Geocoder error ({}) for {:?}",
                response.status(),
                place.as_str()
            )));
        }

        let bytes = response.bytes().await?;
        let candidates: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;

        Ok(parse_candidates(place, candidates))
    }
}
