use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{ArtistRecord, DateEntry, Listing, LocationEntry, RelationEntry};

const API_TIMEOUT: Duration = Duration::from_secs(30);

/// The four raw collections, as fetched
#[derive(Debug, Default)]
pub struct Collections {
    pub artists: Vec<ArtistRecord>,
    pub locations: Vec<LocationEntry>,
    pub dates: Vec<DateEntry>,
    pub relations: Vec<RelationEntry>,
}

/// Client for the upstream artist API
#[derive(Clone)]
pub struct UpstreamService {
    client: Client,
    base_url: String,
}

impl UpstreamService {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(API_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_artists(&self) -> Result<Vec<ArtistRecord>> {
        self.fetch_collection("artists").await
    }

    pub async fn fetch_locations(&self) -> Result<Vec<LocationEntry>> {
        self.fetch_collection("locations").await
    }

    pub async fn fetch_dates(&self) -> Result<Vec<DateEntry>> {
        self.fetch_collection("dates").await
    }

    pub async fn fetch_relations(&self) -> Result<Vec<RelationEntry>> {
        self.fetch_collection("relation").await
    }

    /// Fetch all four collections. Any single failure fails the whole load;
    /// there is no partial-data mode.
    pub async fn fetch_all(&self) -> Result<Collections> {
        let (artists, locations, dates, relations) = tokio::try_join!(
            self.fetch_artists(),
            self.fetch_locations(),
            self.fetch_dates(),
            self.fetch_relations(),
        )?;

        tracing::info!(
            artists = artists.len(),
            locations = locations.len(),
            dates = dates.len(),
            relations = relations.len(),
            "Upstream collections fetched"
        );

        Ok(Collections {
            artists,
            locations,
            dates,
            relations,
        })
    }

    async fn fetch_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, name);
        tracing::debug!("Fetching upstream collection: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Upstream {} error ({}): {}",
                name, status, error_text
            )));
        }

        let bytes = response.bytes().await?;
        let listing: Listing<T> = serde_json::from_slice(&bytes)?;

        Ok(listing.into_vec())
    }
}
