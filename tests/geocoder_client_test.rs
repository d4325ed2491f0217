//! Integration tests for the Nominatim geocoder client against a mock server

use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use groupie_tracker::config::GeocoderConfig;
use groupie_tracker::models::GeoPoint;
use groupie_tracker::places::PlaceName;
use groupie_tracker::services::{GeocodeCache, Geocoder, NominatimGeocoder};
use groupie_tracker::test_utils::aggregated_artist;

const USER_AGENT: &str = "groupie-tracker-tests/0.1 (tests@example.com)";

fn geocoder_config(server: &MockServer) -> GeocoderConfig {
    GeocoderConfig {
        url: format!("{}/search", server.uri()),
        user_agent: USER_AGENT.to_string(),
        timeout: Duration::from_secs(2),
        pacing: Duration::from_millis(1),
        batch_budget: None,
    }
}

fn place(name: &str) -> PlaceName {
    PlaceName::parse(name).unwrap()
}

async fn mount_place(server: &MockServer, q: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", q))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolve_sends_identity_and_single_candidate_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "new york"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"lat": "40.71", "lon": "-74.0"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();
    let point = geocoder.resolve(&place("new york")).await.unwrap();

    assert_eq!(
        point,
        Some(GeoPoint {
            location: "new york".to_string(),
            lat: 40.71,
            lon: -74.0,
        })
    );
}

#[tokio::test]
async fn test_resolve_string_and_numeric_coordinates_agree() {
    let server = MockServer::start().await;
    mount_place(&server, "paris-text", json!([{"lat": "48.8566", "lon": "2.3522"}])).await;
    mount_place(&server, "paris-number", json!([{"lat": 48.8566, "lon": 2.3522}])).await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();
    let text = geocoder.resolve(&place("paris-text")).await.unwrap().unwrap();
    let number = geocoder.resolve(&place("paris-number")).await.unwrap().unwrap();

    assert_eq!(text.lat, 48.8566);
    assert_eq!(text.lat, number.lat);
    assert_eq!(text.lon, number.lon);
}

#[tokio::test]
async fn test_resolve_empty_candidates_is_not_found() {
    let server = MockServer::start().await;
    mount_place(&server, "atlantis", json!([])).await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();
    let result = assert_ok!(geocoder.resolve(&place("atlantis")).await);

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_resolve_malformed_candidate_is_not_found() {
    let server = MockServer::start().await;
    mount_place(&server, "nowhere", json!([{"lat": "north", "lon": null}])).await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();
    let result = assert_ok!(geocoder.resolve(&place("nowhere")).await);

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_resolve_error_status_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();

    assert!(geocoder.resolve(&place("paris")).await.is_err());
}

#[tokio::test]
async fn test_resolve_undecodable_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();

    assert!(geocoder.resolve(&place("paris")).await.is_err());
}

#[tokio::test]
async fn test_resolve_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"lat": "1", "lon": "1"}]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = GeocoderConfig {
        timeout: Duration::from_millis(200),
        ..geocoder_config(&server)
    };
    let geocoder = NominatimGeocoder::new(&config).unwrap();

    assert!(geocoder.resolve(&place("slowtown")).await.is_err());
}

#[tokio::test]
async fn test_lookups_are_paced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let config = GeocoderConfig {
        pacing: Duration::from_millis(100),
        ..geocoder_config(&server)
    };
    let geocoder = NominatimGeocoder::new(&config).unwrap();

    let started = Instant::now();
    for name in ["a", "b", "c"] {
        geocoder.resolve(&place(name)).await.unwrap();
    }

    assert!(started.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_cache_over_real_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"lat": "48.85", "lon": "2.35"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "london"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"lat": 51.5, "lon": -0.12}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&geocoder_config(&server)).unwrap();
    let cache = GeocodeCache::new(Arc::new(geocoder), None);
    let artist = aggregated_artist(7, &["paris", "london"], vec![("Berlin", vec!["01-02-2020"])]);

    let first = cache.get_or_resolve(7, &artist).await.unwrap();
    let second = cache.get_or_resolve(7, &artist).await.unwrap();

    let locations: Vec<&str> = first.iter().map(|p| p.location.as_str()).collect();
    assert_eq!(locations, vec!["paris", "london"]);
    assert_eq!(first, second);
    // MockServer verifies each `expect(1)` on drop
}
