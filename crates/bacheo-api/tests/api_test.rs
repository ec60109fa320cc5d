//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bacheo_api::{create_router, AppState};
use bacheo_core::config::LayeredConfig;
use bacheo_core::error::Result;
use bacheo_core::models::{GeoPoint, StreetMeta};
use bacheo_geocode::ReverseGeocoder;
use bacheo_store::MemoryBacheStore;
use serde_json::{json, Value};
use tower::ServiceExt;

struct FixedGeocoder;

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
    async fn reverse(&self, _point: GeoPoint) -> Result<StreetMeta> {
        Ok(StreetMeta::new("Av. Juárez", vec!["Madero".into(), "Bolívar".into()]))
    }
}

fn app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryBacheStore::new()),
        Arc::new(FixedGeocoder),
        LayeredConfig::with_defaults(),
    )
    .unwrap();
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn new_bache(medidas: &str) -> Value {
    json!({
        "medidas": medidas,
        "coordenadas": {"lat": 19.4326, "lng": -99.1332},
        "calle": "Av. Juárez",
        "entreCalles": ["Madero", "Bolívar"],
        "curbSide": "abajo",
        "residenteUid": "residente-1"
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send_json(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "bacheo-api");
}

#[tokio::test]
async fn test_create_and_fetch() {
    let app = app();

    let (status, created) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("4\n4\n4\n4"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["forma"], "trapecio");
    assert_eq!(created["area"], 16.0);
    assert_eq!(created["noBache"], 1);
    assert_eq!(created["curbSide"], "abajo");
    assert_eq!(created["status"], "registrado");
    assert_eq!(created["vertices"].as_array().unwrap().len(), 4);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send_json(&app, "GET", &format!("/api/v1/baches/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = send_json(&app, "GET", "/api/v1/baches?residente=residente-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();

    let (status, body) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("4\nabc"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("found 1"));

    let mut no_anchor = new_bache("3\n2\n2");
    no_anchor["coordenadas"] = Value::Null;
    let (status, _) = send_json(&app, "POST", "/api/v1/baches", Some(no_anchor)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send_json(&app, "GET", "/api/v1/baches", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_geometry_rebuilds_shape() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("4\n4\n4\n4"))).await;
    let id = created["id"].as_str().unwrap();

    let (status, edited) = send_json(
        &app,
        "PUT",
        &format!("/api/v1/baches/{}/geometry", id),
        Some(json!({"medidas": "3\n2\n2", "curbSide": "abajo"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["forma"], "triangulo");
    assert_eq!(edited["area"], 3.0);
    assert_eq!(edited["vertices"].as_array().unwrap().len(), 3);
    assert_eq!(edited["curbSide"], Value::Null);
    assert_eq!(edited["noBache"], created["noBache"]);
}

#[tokio::test]
async fn test_status_regression_is_conflict() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("3\n2\n2"))).await;
    let uri = format!("/api/v1/baches/{}/status", created["id"].as_str().unwrap());

    let (status, body) = send_json(&app, "PUT", &uri, Some(json!({"status": "terminado"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "terminado");

    let (status, _) = send_json(&app, "PUT", &uri, Some(json!({"status": "iniciado"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send_json(&app, "PUT", &uri, Some(json!({"status": "reparado"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anchor_evidence_and_delete() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("3\n2\n2"))).await;
    let base = format!("/api/v1/baches/{}", created["id"].as_str().unwrap());

    let (status, moved) = send_json(
        &app,
        "PUT",
        &format!("{}/anchor", base),
        Some(json!({"coordenadas": {"lat": 19.44, "lng": -99.14}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["coordenadas"]["lat"], 19.44);
    assert_eq!(moved["vertices"], created["vertices"]);

    let (status, with_photo) = send_json(
        &app,
        "POST",
        &format!("{}/evidence", base),
        Some(json!({"phase": "before", "url": "https://img/a.jpg"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(with_photo["evidence"]["before"], "https://img/a.jpg");

    let (status, _) = send_json(&app, "DELETE", &base, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "GET", &base, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = app();
    let (status, _) = send_json(&app, "GET", "/api/v1/baches/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "DELETE",
        "/api/v1/baches/6f1c2a8e-4b8f-4c5e-9d7a-2f0e1b3c4d5e",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sketch_and_csv() {
    let app = app();
    let (_, created) = send_json(&app, "POST", "/api/v1/baches", Some(new_bache("4\n4\n4\n4"))).await;

    let (status, svg) = send(
        &app,
        "GET",
        &format!("/api/v1/baches/{}/sketch.svg", created["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let svg = String::from_utf8(svg).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Área: 16.00 m²"));

    let (status, csv) = send(&app, "GET", "/api/v1/baches/export.csv", None).await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().next().unwrap().starts_with("noBache,calle,entreCalles"));
}

#[tokio::test]
async fn test_map_overlay() {
    let app = app();
    send_json(&app, "POST", "/api/v1/baches", Some(new_bache("4\n4\n4\n4"))).await;

    let (status, body) = send_json(&app, "GET", "/api/v1/map?lat=19.43&lng=-99.13", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    // polygon, curb line and anchor
    assert_eq!(body["features"].as_array().unwrap().len(), 3);
    assert!(body["bounds"]["minLat"].as_f64().unwrap() < 19.43);
    assert!(body["center"].is_object());

    let (status, empty) = send_json(&app, "GET", "/api/v1/map?residente=nadie", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty["features"].as_array().unwrap().is_empty());
    assert_eq!(empty["bounds"], Value::Null);
}

#[tokio::test]
async fn test_preview_and_calculator() {
    let app = app();

    let (status, preview) = send_json(
        &app,
        "POST",
        "/api/v1/geometry/preview",
        Some(json!({"medidas": "3\n2\n2", "curbSide": "base"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["forma"], "triangulo");
    assert_eq!(preview["curbSide"], "base");
    assert_eq!(preview["curbOptions"], json!(["base", "derecha", "izquierda"]));

    let (status, calc) = send_json(
        &app,
        "POST",
        "/api/v1/calculator",
        Some(json!({"rows": [
            {"largo": 2.0, "ancho": 1.5, "espAsfalto": 0.05, "espEscombro": 0.15},
            {"largo": 100.0, "ancho": 100.0, "espAsfalto": 10.0, "espEscombro": 10.0, "unidad": "cm", "densidad": 2.0}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first = &calc["rows"][0];
    assert!((first["area"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    assert!((first["toneladas"].as_f64().unwrap() - 0.72).abs() < 1e-9);
    assert_eq!(calc["totals"]["count"], 2);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/v1/calculator",
        Some(json!({"rows": [{"largo": 0.0, "ancho": 1.0, "espAsfalto": 0.1, "espEscombro": 0.1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geocode() {
    let app = app();
    let (status, body) = send_json(&app, "GET", "/api/v1/geocode?lat=19.43&lng=-99.13", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calle"], "Av. Juárez");
    assert_eq!(body["entreCalles"], json!(["Madero", "Bolívar"]));

    let (status, _) = send_json(&app, "GET", "/api/v1/geocode?lat=95&lng=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
