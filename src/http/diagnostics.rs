//! Read-only introspection surface.
//!
//! Health, CORS introspection, the root service descriptor and the catch-all
//! 404. Everything here derives from [`crate::db::ConnectionState`] and the
//! active CORS policy; nothing is persisted and every report is recomputed
//! per request.

use axum::extract::{OriginalUri, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::DiagnosticsMode;
use crate::http::server::AppState;

/// Liveness + dependency status report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    status: &'static str,
    message: &'static str,
    database: DatabaseStatus,
    environment: String,
    timestamp: String,
    /// Seconds since the gateway started.
    uptime: f64,
    memory: MemorySnapshot,
    cors: CorsStatus,
}

#[derive(Debug, Serialize)]
struct DatabaseStatus {
    status: &'static str,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CorsStatus {
    enabled: bool,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    resident_bytes: u64,
    virtual_bytes: u64,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Response {
    match compose_report(&state) {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to compose health report");
            let detail = match state.config.diagnostics_mode() {
                DiagnosticsMode::Development => json!(err.to_string()),
                DiagnosticsMode::Production => json!({}),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "ERROR",
                    "message": "failed to compose health report",
                    "error": detail,
                })),
            )
                .into_response()
        }
    }
}

fn compose_report(state: &AppState) -> std::io::Result<HealthReport> {
    let connection = state.connection.current_state();
    Ok(HealthReport {
        status: "OK",
        message: "gateway is running",
        database: DatabaseStatus {
            status: connection.health_label(),
            name: connection
                .database_name()
                .unwrap_or("not connected")
                .to_string(),
        },
        environment: state.config.environment.name.clone(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        memory: memory_snapshot()?,
        cors: CorsStatus {
            enabled: true,
            allowed_origins: state.config.cors.allowed_origins.clone(),
        },
    })
}

#[cfg(target_os = "linux")]
fn memory_snapshot() -> std::io::Result<MemorySnapshot> {
    // /proc/self/statm: total program size and resident set, in pages.
    // Assumes the standard 4 KiB page size; on kernels configured with
    // larger pages the byte counts undershoot, which is acceptable for a
    // diagnostic snapshot.
    let statm = std::fs::read_to_string("/proc/self/statm")?;
    let mut fields = statm.split_whitespace();
    let mut next = || {
        fields
            .next()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
    };
    let page_size = 4096;
    let virtual_pages = next();
    let resident_pages = next();
    Ok(MemorySnapshot {
        resident_bytes: resident_pages * page_size,
        virtual_bytes: virtual_pages * page_size,
    })
}

#[cfg(not(target_os = "linux"))]
fn memory_snapshot() -> std::io::Result<MemorySnapshot> {
    Ok(MemorySnapshot {
        resident_bytes: 0,
        virtual_bytes: 0,
    })
}

/// GET /api/cors-test
pub async fn cors_test(State(state): State<AppState>, headers: HeaderMap) -> Json<Value> {
    let current_origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("No origin header");

    Json(json!({
        "message": "CORS is configured",
        "allowedOrigins": state.config.cors.allowed_origins,
        "currentOrigin": current_origin,
        "timestamp": Utc::now().to_rfc3339(),
        "endpoints": endpoint_directory(),
    }))
}

/// GET / — static service descriptor, no state access.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Reservation gateway API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
        "documentation": {
            "health": "/api/health",
            "corsTest": "/api/cors-test",
            "api": {
                "reservations": "/api/reservations",
                "tables": "/api/tables",
                "notifications": "/api/notifications",
            },
        },
    }))
}

/// Catch-all for unmatched paths; registered after every real route.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "route not found",
            "path": uri.to_string(),
            "availableEndpoints": endpoint_directory(),
        })),
    )
}

fn endpoint_directory() -> Value {
    json!({
        "health": "/api/health",
        "corsTest": "/api/cors-test",
        "reservations": "/api/reservations",
        "tables": "/api/tables",
        "notifications": "/api/notifications",
    })
}
