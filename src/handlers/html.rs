use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::artists::ArtistIdQuery;
use crate::{
    models::AggregatedArtist,
    state::AppState,
    templates::{artist_map_page, artist_page, index_page, not_found_page},
};

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// Artist index, optionally filtered by name
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let artists = state.catalog.search(&query.search);
    Html(index_page(&artists, &query.search).into_string())
}

/// Artist detail page
pub async fn artist_detail(
    State(state): State<AppState>,
    Query(query): Query<ArtistIdQuery>,
) -> Response {
    match find_artist(&state, &query) {
        Some(artist) => Html(artist_page(artist).into_string()).into_response(),
        None => not_found(),
    }
}

/// Map of every place the artist toured; coordinates are fetched client-side
/// from `/api/artist_locations`
pub async fn artist_map(
    State(state): State<AppState>,
    Query(query): Query<ArtistIdQuery>,
) -> Response {
    match find_artist(&state, &query) {
        Some(artist) => Html(artist_map_page(artist).into_string()).into_response(),
        None => not_found(),
    }
}

// Pages treat a missing or malformed id the same as an unknown artist
fn find_artist<'a>(state: &'a AppState, query: &ArtistIdQuery) -> Option<&'a AggregatedArtist> {
    let id = query.artist_id().ok()?;
    state.catalog.find(id)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(not_found_page().into_string())).into_response()
}
