//! Gateway bootstrap and lifecycle.
//!
//! # Responsibilities
//! - Build the Axum router from the validated stage plan
//! - Wire the CORS engine, body limit and error backstop in order
//! - Mount the three resource collaborators under /api
//! - Start the data-store connect sequence alongside the listener
//! - Drive graceful shutdown: signal → drain → close store → exit
//!
//! Process lifetime: Starting → Listening → ShuttingDown → Terminated.
//! A connect failure is surfaced as an error value from [`GatewayServer::run`]
//! so callers (including tests) decide process fate; `main` maps it to a
//! non-zero exit.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::cors;
use crate::db::ConnectionManager;
use crate::http::diagnostics;
use crate::http::error::{ErrorNormalizer, GatewayError};
use crate::http::request::MakeGatewayRequestId;
use crate::lifecycle::signals;
use crate::pipeline::{Stage, StagePlan};
use crate::routes;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub connection: Arc<ConnectionManager>,
    pub errors: ErrorNormalizer,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Arc<GatewayConfig>, connection: Arc<ConnectionManager>) -> Self {
        let errors = ErrorNormalizer::new(config.diagnostics_mode());
        Self {
            config,
            connection,
            errors,
            started_at: Instant::now(),
        }
    }
}

/// HTTP server for the reservation gateway.
pub struct GatewayServer {
    config: Arc<GatewayConfig>,
    connection: Arc<ConnectionManager>,
    state: AppState,
}

impl GatewayServer {
    /// Create a new gateway with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let config = Arc::new(config);
        let connection = Arc::new(ConnectionManager::new());
        let state = AppState::new(config.clone(), connection.clone());
        Self {
            config,
            connection,
            state,
        }
    }

    /// The injected connection manager (shared with tests).
    pub fn connection(&self) -> Arc<ConnectionManager> {
        self.connection.clone()
    }

    /// Build the router from the canonical stage plan.
    pub fn router(&self) -> Router {
        Self::assemble(&StagePlan::standard(), self.state.clone())
    }

    /// Assemble the pipeline from a validated plan.
    fn assemble(plan: &StagePlan, state: AppState) -> Router {
        // Route stages mount in plan order; layer stages are skipped here.
        let mut app = Router::new();
        for stage in plan.stages() {
            app = match stage {
                Stage::Resources => app
                    .nest("/api/reservations", routes::reservations::router())
                    .nest("/api/tables", routes::tables::router())
                    .nest("/api/notifications", routes::notifications::router()),
                Stage::Diagnostics => app
                    .route("/", get(diagnostics::root))
                    .route("/api/health", get(diagnostics::health))
                    .route("/api/cors-test", get(diagnostics::cors_test)),
                Stage::NotFound => app.fallback(diagnostics::not_found),
                Stage::Cors | Stage::BodyLimit | Stage::ErrorBackstop => app,
            };
        }

        // Layer stages. `.layer` wraps everything added so far, so the walk
        // runs in reverse plan order: the first stage ends up outermost and
        // runs first on the way in. The backstop is hoisted above them all;
        // as the outermost wrapper it catches failures from every inner
        // stage, which is what "last" means for an error stage.
        let mut app = app.with_state(state.clone());
        for stage in plan.stages().iter().rev() {
            app = match stage {
                Stage::Cors => app.layer(middleware::from_fn_with_state(
                    state.clone(),
                    cors::engine::apply,
                )),
                Stage::BodyLimit => {
                    app.layer(DefaultBodyLimit::max(state.config.http.body_limit_bytes))
                }
                Stage::ErrorBackstop | Stage::Resources | Stage::Diagnostics | Stage::NotFound => {
                    app
                }
            };
        }

        app.layer(CatchPanicLayer::custom(state.errors.panic_handler()))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeGatewayRequestId))
    }

    /// Run the gateway until a termination signal or a fatal failure.
    ///
    /// The listener starts without waiting for the store; requests that need
    /// the database before it is ready surface as 503 through the error
    /// normalizer. A connect failure stops the server and is returned to the
    /// caller instead of killing the process from here.
    pub async fn run(self) -> Result<(), GatewayError> {
        let app = self.router();

        let address = self.config.listener.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| GatewayError::Bind {
                address: address.clone(),
                source,
            })?;
        tracing::info!(address = %address, environment = %self.config.environment.name, "gateway listening");

        // Connect concurrently; listener start is not gated on the store.
        let (fatal_tx, fatal_rx) = oneshot::channel();
        let connection = self.connection.clone();
        let database_config = self.config.database.clone();
        tokio::spawn(async move {
            if let Err(err) = connection.connect(&database_config).await {
                let _ = fatal_tx.send(GatewayError::from(err));
            }
        });

        // Serve until a signal or a fatal connect failure. Graceful shutdown
        // stops accepting and drains in-flight requests before the store is
        // closed.
        let (cause_tx, cause_rx) = oneshot::channel();
        let shutdown = async move {
            let cause = shutdown_cause(signals::terminated(), fatal_rx).await;
            let _ = cause_tx.send(cause);
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        self.connection.close().await;

        match cause_rx.await {
            Ok(Some(err)) => Err(err),
            _ => {
                tracing::info!("gateway stopped");
                Ok(())
            }
        }
    }
}

/// Decide why the server should stop.
///
/// A successful connect drops the fatal sender without sending; that must
/// not end the steady state, so the closed-channel case falls back to
/// waiting for the termination signal.
async fn shutdown_cause(
    signal: impl std::future::Future<Output = ()>,
    fatal: oneshot::Receiver<GatewayError>,
) -> Option<GatewayError> {
    tokio::pin!(signal);
    let outcome = tokio::select! {
        _ = &mut signal => return None,
        outcome = fatal => outcome,
    };
    match outcome {
        Ok(err) => Some(err),
        // Sender dropped: the connect sequence finished cleanly.
        Err(_) => {
            signal.await;
            None
        }
    }
}
