pub mod artists;
pub mod health;
pub mod html;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(artists::list_artists))
        .route("/artist_locations", get(artists::artist_locations))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))
        .route("/artist", get(html::artist_detail))
        .route("/artist_map", get(html::artist_map))
}
