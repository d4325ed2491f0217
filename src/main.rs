use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use groupie_tracker::{
    catalog::{aggregate, Catalog},
    config::Config,
    create_router,
    services::{GeocodeCache, NominatimGeocoder, UpstreamService},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupie_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Groupie Tracker...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Fetch upstream collections; any failure aborts startup
    let upstream = UpstreamService::new(config.upstream_api_base.as_str())
        .context("Failed to build upstream client")?;
    let collections = upstream
        .fetch_all()
        .await
        .with_context(|| format!("Failed to load artist data from {}", config.upstream_api_base))?;

    let catalog = Catalog::new(aggregate(
        collections.artists,
        collections.locations,
        collections.dates,
        collections.relations,
    ));
    tracing::info!("Artist catalog built with {} artists", catalog.len());

    // Geocoding
    let geocoder =
        NominatimGeocoder::new(&config.geocoder).context("Failed to build geocoder client")?;
    let geocode_cache = GeocodeCache::new(Arc::new(geocoder), config.geocoder.batch_budget);
    tracing::info!(
        "Geocoder ready ({}, pacing {:?})",
        config.geocoder.url,
        config.geocoder.pacing
    );

    // Initialize application state
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("SERVER_HOST/SERVER_PORT do not form a valid socket address")?;
    let state = AppState::new(catalog, geocode_cache, config);

    // Build application routes
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
