//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;

use reservation_gateway::config::GatewayConfig;
use reservation_gateway::GatewayServer;

/// A gateway router over a never-connected store, development mode.
pub fn dev_router() -> Router {
    GatewayServer::new(GatewayConfig::default()).router()
}

/// Same, but with a non-development environment name.
pub fn production_router() -> Router {
    let mut config = GatewayConfig::default();
    config.environment.name = "production".to_string();
    GatewayServer::new(config).router()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request builds")
}

pub fn get_with_origin(path: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header("Origin", origin)
        .body(Body::empty())
        .expect("request builds")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
