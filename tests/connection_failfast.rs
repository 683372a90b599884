//! Connect-failure semantics: fail fast, no retry, clean close.

use std::time::Duration;

use axum::http::StatusCode;

use reservation_gateway::config::{DatabaseConfig, DiagnosticsMode, GatewayConfig};
use reservation_gateway::db::StoreError;
use reservation_gateway::http::ErrorNormalizer;
use reservation_gateway::{ConnectionManager, ConnectionState, GatewayServer};

/// Nothing listens on the discard port, so server selection times out fast.
fn unreachable_store() -> DatabaseConfig {
    DatabaseConfig {
        uri: "mongodb://127.0.0.1:9/failfast?directConnection=true".to_string(),
        server_selection_timeout_ms: 300,
        connect_timeout_ms: 200,
    }
}

#[tokio::test]
async fn connect_timeout_transitions_to_failed() {
    let manager = ConnectionManager::new();
    let err = manager
        .connect(&unreachable_store())
        .await
        .expect_err("store is unreachable");
    assert!(matches!(err, StoreError::Connect(_)));

    // Failed is terminal: no retry happened and the state records the error.
    match &*manager.current_state() {
        ConnectionState::Failed { error } => assert!(!error.is_empty()),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(matches!(manager.database(), Err(StoreError::Unavailable)));
}

#[tokio::test]
async fn connect_failure_normalizes_to_service_unavailable() {
    let manager = ConnectionManager::new();
    let err = manager
        .connect(&unreachable_store())
        .await
        .expect_err("store is unreachable");

    let normalizer = ErrorNormalizer::new(DiagnosticsMode::Production);
    let response = normalizer.normalize(err.into());
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn run_stops_with_an_error_after_a_fatal_connect() {
    let mut config = GatewayConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.database = unreachable_store();

    let server = GatewayServer::new(config);
    let connection = server.connection();

    // The whole lifecycle: listen, fail the connect, drain, close, return.
    let err = tokio::time::timeout(Duration::from_secs(5), server.run())
        .await
        .expect("run must stop on its own after a fatal connect")
        .expect_err("connect failure is fatal");
    assert!(err.is_connectivity());

    // close() ran before run returned.
    assert_eq!(*connection.current_state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn close_after_failed_connect_is_idempotent() {
    let manager = ConnectionManager::new();
    let _ = manager.connect(&unreachable_store()).await;

    manager.close().await;
    assert_eq!(*manager.current_state(), ConnectionState::Disconnected);

    // A second close must be a no-op.
    manager.close().await;
    assert_eq!(*manager.current_state(), ConnectionState::Disconnected);
}
