use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use store::{InMemoryStore, JsonFileStore, Profile};
use tower::ServiceExt;
use vivaha::{SearchPipeline, VivahaConfig};

fn profiles() -> Vec<Profile> {
    vec![
        Profile::new("1", "VM-001", "Lakshmi", "Female", "1996-04-12")
            .with_contact("98765 43210")
            .with_nakshatra("7")
            .with_gothram("Kashyapa"),
        Profile::new("2", "VM-002", "Arjun", "Male", "1992-11-02")
            .with_nakshatra("4")
            .with_gothram("Atreya"),
        Profile::new("3", "VM-003", "Meena", "female ", "1999-01-30")
            .with_nakshatra("9")
            .with_gothram("Vasishta"),
    ]
}

fn app() -> Router {
    let config = VivahaConfig::from_yaml(
        "version: \"1.0\"\ncompatibility:\n  nakshatra:\n    \"4\": [\"4\", \"7\"]\n",
    )
    .unwrap();
    let pipeline = SearchPipeline::new(Arc::new(InMemoryStore::with_profiles(profiles())), &config);
    let state = ServerState::with_pipeline(ServerConfig::default(), pipeline)
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    build_router(Arc::new(state))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn serials(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["serial_no"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn health_and_ready() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["store"]["profiles"], 3);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = app()
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn lookup_without_params_returns_everything() {
    let (status, body) = get("/api/v1/profiles/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), ["VM-001", "VM-002", "VM-003"]);
}

#[tokio::test]
async fn lookup_filters_and_reports_skips() {
    let (_, body) = get("/api/v1/profiles/search?contact_no=987-654").await;
    assert_eq!(serials(&body), ["VM-001"]);

    let response = app()
        .oneshot(
            Request::get("/api/v1/profiles/search?gender=male")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-skipped-predicates"], "gender");

    let (_, body) = get("/api/v1/profiles/search?gender=Female").await;
    assert_eq!(serials(&body), ["VM-001", "VM-003"]);
}

#[tokio::test]
async fn plan_reflects_mode_and_gate() {
    let (status, body) = post(
        "/api/v1/criteria/plan",
        json!({
            "mode": "nakshatra",
            "gender": "Female",
            "seeker_age": "30",
            "enable_rasi_compatibility": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fields"]["mode"], "nakshatra");
    assert_eq!(body["rasi"]["required"], true);
    assert_eq!(body["age_preference"]["label"], "Maximum Partner Age");
    assert_eq!(body["age_preference"]["bounds"]["min"], 30);
}

#[tokio::test]
async fn plan_without_mode_has_no_fields() {
    let (status, body) = post("/api/v1/criteria/plan", json!({ "mode": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["fields"].is_null());
    assert_eq!(body["rasi"]["active"], false);
}

#[tokio::test]
async fn validate_accepts_and_rejects() {
    let (status, body) = post(
        "/api/v1/criteria/validate",
        json!({ "mode": "serial", "serial_no": " VM-002 " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["criteria"]["serial_no"], "VM-002");

    let (status, body) = post(
        "/api/v1/criteria/validate",
        json!({ "mode": "nakshatra", "nakshatra_id": "4", "gender": "Male", "seeker_age": "17" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "seeker_age");
    assert_eq!(
        body["error"]["message"],
        "Please enter a valid age between 18 and 100."
    );
}

#[tokio::test]
async fn missing_mode_is_structural() {
    let (status, body) = post("/api/v1/criteria/validate", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "STRUCTURAL_ERROR");
    assert!(body["error"].get("field").is_none());
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, body) = send(
        Request::post("/api/v1/search")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn search_by_nakshatra() {
    let (status, body) = post(
        "/api/v1/search",
        json!({
            "mode": "nakshatra",
            "nakshatra_id": "4",
            "gender": "Male",
            "seeker_age": "31",
            "gothram": "Bharadwaja"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), ["VM-001"]);
}

#[tokio::test]
async fn search_accepts_numeric_fields() {
    let (status, body) = post(
        "/api/v1/search",
        json!({
            "mode": "nakshatra",
            "nakshatra_id": 4,
            "gender": "Male",
            "seeker_age": 31,
            "gothram": "Bharadwaja",
            "age_preference": ""
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), ["VM-001"]);
}

#[tokio::test]
async fn numeric_out_of_range_age_reaches_validator() {
    let (status, body) = post(
        "/api/v1/criteria/validate",
        json!({ "mode": "nakshatra", "nakshatra_id": 4, "gender": "Male", "seeker_age": 17 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["field"], "seeker_age");
}

#[tokio::test]
async fn ready_reports_unreadable_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("missing.json"));
    let pipeline = SearchPipeline::new(Arc::new(store), &VivahaConfig::default());
    let state = ServerState::with_pipeline(ServerConfig::default(), pipeline);
    let response = build_router(Arc::new(state))
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["components"]["store"]["status"], "unavailable");
}

#[tokio::test]
async fn search_by_serial() {
    let (status, body) = post(
        "/api/v1/search",
        json!({ "mode": "serial", "serial_no": "VM-002" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), ["VM-001"]);
}

#[tokio::test]
async fn unknown_seeker_is_404() {
    let (status, body) = post(
        "/api/v1/search",
        json!({ "mode": "serial", "serial_no": "VM-404" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SEEKER_NOT_FOUND");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, body) = get("/api/v2/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
