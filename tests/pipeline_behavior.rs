//! End-to-end pipeline behavior over a never-connected store.
//!
//! These tests drive the fully assembled router in-process; no sockets and
//! no MongoDB. The store stays disconnected, which is exactly the window
//! between listener start and connect completion.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use reservation_gateway::http::X_REQUEST_ID;

use common::{body_json, dev_router, get, get_with_origin, production_router};

const ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[tokio::test]
async fn allowed_origin_receives_cors_headers() {
    let response = dev_router()
        .oneshot(get_with_origin("/", ALLOWED_ORIGIN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        ALLOWED_ORIGIN
    );
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

#[tokio::test]
async fn unlisted_origin_receives_no_cors_headers() {
    let response = dev_router()
        .oneshot(get_with_origin("/", "https://evil.example"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("access-control-allow-origin").is_none());
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}

#[tokio::test]
async fn preflight_is_answered_before_any_route() {
    // A collaborator route would 503 on the disconnected store, so a 204
    // proves the OPTIONS request never got that far.
    for path in ["/api/reservations", "/api/tables/abc", "/no/such/path"] {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(path)
            .header("Origin", ALLOWED_ORIGIN)
            .body(Body::empty())
            .unwrap();

        let response = dev_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "path {path}");
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            ALLOWED_ORIGIN
        );
        assert!(response
            .headers()
            .get("access-control-allow-methods")
            .is_some());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn health_reports_disconnected_store() {
    let response = dev_router().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"]["status"], "disconnected");
    assert_eq!(body["environment"], "development");
    assert!(body["uptime"].as_f64().is_some());
    assert!(body["cors"]["allowedOrigins"].as_array().is_some());
}

#[tokio::test]
async fn root_serves_service_descriptor() {
    let response = dev_router().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["documentation"]["health"], "/api/health");
    assert_eq!(
        body["documentation"]["api"]["reservations"],
        "/api/reservations"
    );
}

#[tokio::test]
async fn cors_test_echoes_caller_origin() {
    let response = dev_router()
        .oneshot(get_with_origin("/api/cors-test", ALLOWED_ORIGIN))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["currentOrigin"], ALLOWED_ORIGIN);

    let response = dev_router().oneshot(get("/api/cors-test")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["currentOrigin"], "No origin header");
}

#[tokio::test]
async fn unknown_path_is_404_with_requested_url() {
    let response = dev_router()
        .oneshot(get("/api/unknown?attempt=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["path"], "/api/unknown?attempt=1");
    assert!(body["availableEndpoints"]["health"].is_string());
}

#[tokio::test]
async fn disconnected_store_surfaces_as_503_envelope() {
    let response = dev_router().oneshot(get("/api/reservations")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["message"], "data-store connection error");
    // Development mode carries the underlying error text.
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn production_mode_hides_error_detail() {
    let response = production_router()
        .oneshot(get("/api/tables"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!({}));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = dev_router().oneshot(get("/")).await.unwrap();
    let id = response
        .headers()
        .get(X_REQUEST_ID)
        .expect("request id present")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn error_envelope_shape_is_stable() {
    let response = dev_router()
        .oneshot(get("/api/notifications"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let object = body.as_object().unwrap();
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();
    assert_eq!(keys, ["error", "message"]);
    assert!(matches!(body["message"], Value::String(_)));
}
