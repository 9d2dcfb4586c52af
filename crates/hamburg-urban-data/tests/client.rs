//! Integration tests for the dataset operations, backed by a mock
//! HTTP server serving canned GeoJSON bodies.

use std::time::Duration;

use hamburg_urban_data::{
    Error, GarageQueryOptions, GarageStatus, QueryOptions, UrbanDataClient, UrbanDataClientConfig,
};
use httpmock::prelude::*;

const DISABLED_PARKING: &str = include_str!("fixtures/disabled_parking.geojson");
const PARK_AND_RIDE: &str = include_str!("fixtures/park_and_ride.geojson");
const GARAGES: &str = include_str!("fixtures/garages.geojson");
const GARAGES_LIVE: &str = include_str!("fixtures/garages_live.geojson");

const DISABLED_PARKING_PATH: &str =
    "/behindertenstellplaetze/collections/verkehr_behindertenparkpl/items";
const PARK_AND_RIDE_PATH: &str = "/p_und_r/collections/p_und_r/items";
const GARAGES_PATH: &str = "/parkhaeuser/collections/verkehr_parkhaeuser/items";

fn client(server: &MockServer) -> UrbanDataClient {
    client_with_timeout(server, Duration::from_secs(10))
}

fn client_with_timeout(server: &MockServer, request_timeout: Duration) -> UrbanDataClient {
    UrbanDataClient::new(UrbanDataClientConfig {
        base_url: server.base_url(),
        request_timeout,
    })
}

#[tokio::test]
async fn disabled_parkings_maps_every_feature() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(DISABLED_PARKING_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(DISABLED_PARKING);
    });

    let spots = client(&server)
        .disabled_parkings(&QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0].spot_id, "verkehr_behindertenparkpl.1");
    assert_eq!(spots[0].street.as_deref(), Some("Jungfernstieg 50"));
    assert_eq!(spots[1].limitation, None);
}

#[tokio::test]
async fn limit_is_forwarded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path(DISABLED_PARKING_PATH)
            .query_param("limit", "25");
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(DISABLED_PARKING);
    });

    client(&server)
        .disabled_parkings(&QueryOptions { limit: 25 })
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn park_and_rides_maps_every_feature() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(PARK_AND_RIDE_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(PARK_AND_RIDE);
    });

    let spots = client(&server)
        .park_and_rides(&QueryOptions::default())
        .await
        .unwrap();

    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0].availability_pct, Some(50.0));
    assert!(spots[0].updated_at.is_some());
    // Zero capacity and an unparsable timestamp degrade to absent.
    assert_eq!(spots[1].availability_pct, None);
    assert_eq!(spots[1].updated_at, None);
}

#[tokio::test]
async fn garages_drop_features_without_geometry() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(GARAGES_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(GARAGES);
    });

    let garages = client(&server)
        .garages(&GarageQueryOptions::default())
        .await
        .unwrap();

    // The fixture holds three features, one of them with a null
    // geometry that must be excluded.
    assert_eq!(garages.len(), 2);
    assert_eq!(garages[0].status, GarageStatus::Free);
    assert_eq!(garages[0].address.as_deref(), Some("Am Sandtorkai 6"));
    assert_eq!(garages[1].status, GarageStatus::NoData);
    assert_eq!(garages[1].price, None);
    assert_eq!(garages[1].availability_pct, None);
}

#[tokio::test]
async fn garage_filter_is_forwarded() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path(GARAGES_PATH)
            .query_param("limit", "10")
            .query_param("filter", "frei>=0");
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(GARAGES_LIVE);
    });

    let garages = client(&server)
        .garages(&GarageQueryOptions {
            limit: 10,
            filter: Some("frei>=0".to_string()),
        })
        .await
        .unwrap();

    mock.assert();
    assert_eq!(garages.len(), 2);
    assert_eq!(garages[1].status, GarageStatus::AlmostFull);
}

#[tokio::test]
async fn unexpected_content_type_is_a_protocol_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(DISABLED_PARKING_PATH);
        then.status(200)
            .header("Content-Type", "text/plain")
            .body("not geojson");
    });

    let err = client(&server)
        .disabled_parkings(&QueryOptions::default())
        .await
        .unwrap_err();

    match err {
        Error::Protocol { content_type, body } => {
            assert!(content_type.contains("text/plain"));
            assert_eq!(body, "not geojson");
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_is_a_connection_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(PARK_AND_RIDE_PATH);
        then.status(500);
    });

    let err = client(&server)
        .park_and_rides(&QueryOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error occurred while communicating with the API."
    );
}

#[tokio::test]
async fn timeout_is_a_connection_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(DISABLED_PARKING_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(DISABLED_PARKING)
            .delay(Duration::from_millis(300));
    });

    let err = client_with_timeout(&server, Duration::from_millis(100))
        .disabled_parkings(&QueryOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Timeout occurred while connecting to the API."
    );
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    // Port 1 is never listening; the connection is refused.
    let err = UrbanDataClient::new(UrbanDataClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout: Duration::from_secs(10),
    })
    .disabled_parkings(&QueryOptions::default())
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error occurred while communicating with the API."
    );
}

#[tokio::test]
async fn malformed_feature_aborts_the_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(DISABLED_PARKING_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(r#"{"features": [{"id": "x", "geometry": {"coordinates": [9.9, 53.5]}}]}"#);
    });

    let err = client(&server)
        .disabled_parkings(&QueryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Mapping(field) if field == "properties"));
}

#[tokio::test]
async fn empty_feature_collection_yields_empty_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(GARAGES_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(r#"{"type": "FeatureCollection", "features": []}"#);
    });

    let garages = client(&server)
        .garages(&GarageQueryOptions::default())
        .await
        .unwrap();

    assert!(garages.is_empty());
}

#[tokio::test]
async fn caller_supplied_pool_outlives_the_client() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(Method::GET).path(DISABLED_PARKING_PATH);
        then.status(200)
            .header("Content-Type", "application/geo+json")
            .body(DISABLED_PARKING);
    });

    let pool = reqwest::Client::new();
    let client = UrbanDataClient::with_http_client(
        pool.clone(),
        UrbanDataClientConfig {
            base_url: server.base_url(),
            request_timeout: Duration::from_secs(10),
        },
    );

    let spots = client
        .disabled_parkings(&QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(spots.len(), 2);
    drop(client);

    // The caller's pool is still usable after the client is gone.
    let response = pool
        .get(server.url(DISABLED_PARKING_PATH))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}
