//! Error normalization.
//!
//! Every failure escaping a route collaborator or pipeline stage is rendered
//! as one uniform JSON envelope. Data-store connectivity failures map to 503,
//! everything else to 500; the underlying error text is only exposed in
//! development mode.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::DiagnosticsMode;
use crate::db::StoreError;

/// Gateway error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Connect failure or an operation issued while disconnected.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A data-store operation failed mid-request. Classified at render time:
    /// network-shaped driver errors become 503, the rest 500.
    #[error("database operation failed: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A collaborator-tagged bad identifier in the request path.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A collaborator-tagged missing document.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Listener bind failure. Fatal; never rendered as a response.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Accept-loop failure while serving.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl GatewayError {
    /// Whether this error means the data store is unreachable.
    pub fn is_connectivity(&self) -> bool {
        match self {
            GatewayError::Store(_) => true,
            GatewayError::Database(err) => is_connectivity_kind(&err.kind),
            _ => false,
        }
    }
}

fn is_connectivity_kind(kind: &mongodb::error::ErrorKind) -> bool {
    use mongodb::error::ErrorKind;
    matches!(
        kind,
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
    )
}

/// Uniform JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
    pub error: Value,
}

/// A normalized error ready to be sent to the client.
#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    envelope: ErrorEnvelope,
}

impl ErrorResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// Terminal normalization stage.
///
/// Constructed once at bootstrap with an explicit [`DiagnosticsMode`] rather
/// than consulting the process environment per response.
#[derive(Debug, Clone, Copy)]
pub struct ErrorNormalizer {
    mode: DiagnosticsMode,
}

impl ErrorNormalizer {
    pub fn new(mode: DiagnosticsMode) -> Self {
        Self { mode }
    }

    /// Convert any gateway error into its response envelope.
    pub fn normalize(&self, err: GatewayError) -> ErrorResponse {
        let (status, message) = match &err {
            _ if err.is_connectivity() => {
                (StatusCode::SERVICE_UNAVAILABLE, "data-store connection error".to_string())
            }
            GatewayError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, "invalid identifier".to_string())
            }
            GatewayError::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string()),
        };

        tracing::error!(status = %status, error = %err, "request failed");

        ErrorResponse {
            status,
            envelope: ErrorEnvelope {
                message,
                error: self.detail(err.to_string()),
            },
        }
    }

    /// Backstop for panics escaping any stage. Handed to the catch-panic
    /// layer wrapping the whole pipeline, so it must handle every shape.
    pub fn panic_handler(
        self,
    ) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
        move |panic| {
            let detail = panic_message(panic.as_ref());
            tracing::error!(detail = %detail, "handler panicked");
            let envelope = ErrorEnvelope {
                message: "internal server error".to_string(),
                error: self.detail(detail),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
        }
    }

    fn detail(&self, text: String) -> Value {
        match self.mode {
            DiagnosticsMode::Development => json!(text),
            DiagnosticsMode::Production => json!({}),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
