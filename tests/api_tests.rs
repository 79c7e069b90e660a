use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use parking_ledger::config::environment::EnvironmentConfig;
use parking_ledger::create_app;
use parking_ledger::models::{RateEntry, RateSchedule};
use parking_ledger::snapshot::NoopSnapshotWriter;
use parking_ledger::state::AppState;

// Función helper para crear la app de test
fn create_test_app(capacity: usize) -> Router {
    let config = EnvironmentConfig {
        capacity,
        rates: RateSchedule::new(vec![
            RateEntry::new("Parking", rust_decimal::Decimal::new(5, 1)),
            RateEntry::new("Car wash", rust_decimal::Decimal::new(2, 0)),
        ])
        .unwrap(),
        ..EnvironmentConfig::default()
    };
    create_app(AppState::new(config, Arc::new(NoopSnapshotWriter)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn park(app: &Router, identifier: &str) -> (StatusCode, Value) {
    send(app, "POST", "/api/parking/sessions", Some(json!({ "identifier": identifier }))).await
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(2);
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_admit_and_lookup() {
    let app = create_test_app(2);

    let (status, body) = park(&app, "KR 12345").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["identifier"], "KR 12345");
    assert_eq!(body["data"]["accrued_fee"], "0");

    let (status, body) = send(&app, "GET", "/api/parking/sessions/KR%2012345", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["identifier"], "KR 12345");

    let (status, body) = send(&app, "GET", "/api/parking/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_admit_is_conflict() {
    let app = create_test_app(2);
    park(&app, "WA1").await;

    let (status, body) = park(&app, "WA1").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_IDENTIFIER");
}

#[tokio::test]
async fn test_capacity_scenario_over_http() {
    let app = create_test_app(2);

    assert_eq!(park(&app, "A").await.0, StatusCode::OK);
    assert_eq!(park(&app, "B").await.0, StatusCode::OK);

    let (status, body) = park(&app, "C").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CAPACITY_EXCEEDED");

    let (status, body) = send(&app, "DELETE", "/api/parking/sessions/A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["identifier"], "A");
    assert_eq!(body["data"]["settled_fee"], "0");

    assert_eq!(park(&app, "C").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_release_unknown_is_not_found() {
    let app = create_test_app(2);

    let (status, body) = send(&app, "DELETE", "/api/parking/sessions/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_IDENTIFIER");

    let (status, _) = send(&app, "GET", "/api/parking/sessions/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_identifier_is_rejected() {
    let app = create_test_app(2);

    let (status, body) = park(&app, "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_spaces_reflect_occupancy() {
    let app = create_test_app(3);
    park(&app, "A").await;

    let (status, body) = send(&app, "GET", "/api/parking/spaces", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capacity"], 3);
    assert_eq!(body["occupied"], 1);
    assert_eq!(body["available"], 2);
}

#[tokio::test]
async fn test_rates_show_billing_cost() {
    let app = create_test_app(1);

    let (status, body) = send(&app, "GET", "/api/parking/rates", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["billing_service"], "Parking");
    assert_eq!(body["rates"][0]["service"], "Parking");
    assert_eq!(body["rates"][0]["cost_per_second"], "0.5");
    assert_eq!(body["rates"][1]["service"], "Car wash");
}
