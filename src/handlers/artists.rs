use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::{AggregatedArtist, ArtistId, GeoPoint},
    state::AppState,
};

#[derive(Deserialize)]
pub struct ArtistIdQuery {
    pub id: Option<String>,
}

impl ArtistIdQuery {
    /// Missing or non-integer ids are a client error
    pub fn artist_id(&self) -> Result<ArtistId> {
        let raw = self
            .id
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::BadRequest("missing id".to_string()))?;

        raw.parse()
            .map_err(|_| AppError::BadRequest("invalid id".to_string()))
    }
}

/// Full aggregated artist list, in upstream order
pub async fn list_artists(State(state): State<AppState>) -> Json<Vec<AggregatedArtist>> {
    Json(state.catalog.artists().to_vec())
}

/// Coordinates for every place an artist has toured, geocoded on first access
pub async fn artist_locations(
    State(state): State<AppState>,
    Query(query): Query<ArtistIdQuery>,
) -> Result<Json<Vec<GeoPoint>>> {
    let id = query.artist_id()?;

    let artist = state
        .catalog
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

    let points = state.geocode_cache.get_or_resolve(id, artist).await?;

    Ok(Json(points.to_vec()))
}
