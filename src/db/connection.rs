//! Lifecycle of the single MongoDB connection.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::{ArcSwap, ArcSwapOption};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::DatabaseConfig;
use crate::db::state::ConnectionState;

/// Database used when the connection string names none.
const DEFAULT_DATABASE: &str = "reservations";

/// Errors owned by the connection manager.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The connect attempt failed. Fatal at startup: the gateway has no
    /// in-memory fallback and must not serve with a dead store.
    #[error("failed to connect to the data store: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// An operation was issued while not connected. Commands are never
    /// buffered; callers fail fast instead of queueing silently.
    #[error("database connection is not established")]
    Unavailable,
}

/// Owns the single outbound MongoDB client and its state machine.
///
/// One instance is constructed at bootstrap and injected into every component
/// that needs it; nothing else may write [`ConnectionState`].
pub struct ConnectionManager {
    state: ArcSwap<ConnectionState>,
    client: ArcSwapOption<Client>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(ConnectionState::Disconnected),
            client: ArcSwapOption::from(None),
        }
    }

    /// Snapshot of the current connection state. Pure read.
    pub fn current_state(&self) -> Arc<ConnectionState> {
        self.state.load_full()
    }

    /// Connect and verify reachability with a ping.
    ///
    /// The attempt is bounded by the configured server-selection timeout.
    /// On failure the state is left at `Failed` and the error is returned to
    /// the caller, which decides process fate; no retry happens here.
    pub async fn connect(&self, config: &DatabaseConfig) -> Result<(), StoreError> {
        self.state.store(Arc::new(ConnectionState::Connecting));
        tracing::info!("connecting to MongoDB");

        match self.try_connect(config).await {
            Ok((client, database)) => {
                self.client.store(Some(Arc::new(client)));
                self.state.store(Arc::new(ConnectionState::Connected {
                    database: database.clone(),
                }));
                tracing::info!(database = %database, "connected to MongoDB");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to connect to MongoDB");
                self.state.store(Arc::new(ConnectionState::Failed {
                    error: err.to_string(),
                }));
                Err(StoreError::Connect(err))
            }
        }
    }

    async fn try_connect(
        &self,
        config: &DatabaseConfig,
    ) -> Result<(Client, String), mongodb::error::Error> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.server_selection_timeout =
            Some(Duration::from_millis(config.server_selection_timeout_ms));
        options.connect_timeout = Some(Duration::from_millis(config.connect_timeout_ms));
        options.app_name = Some("reservation-gateway".to_string());

        let database = options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)?;

        // The driver connects lazily; force server selection now so an
        // unreachable store fails the startup sequence instead of the first
        // user request.
        client
            .database(&database)
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok((client, database))
    }

    /// Handle to the connected database.
    ///
    /// Fails fast while not `Connected` (bufferCommands is effectively off).
    pub fn database(&self) -> Result<Database, StoreError> {
        match self.current_state().as_ref() {
            ConnectionState::Connected { database } => self
                .client
                .load_full()
                .map(|client| client.database(database))
                .ok_or(StoreError::Unavailable),
            _ => Err(StoreError::Unavailable),
        }
    }

    /// Close the connection and return the state machine to `Disconnected`.
    ///
    /// Idempotent: the client is taken out atomically, so a second call (or a
    /// call when nothing ever connected) is a no-op.
    pub async fn close(&self) {
        if let Some(client) = self.client.swap(None) {
            Client::clone(&client).shutdown().await;
            tracing::info!("MongoDB connection closed");
        }
        self.state.store(Arc::new(ConnectionState::Disconnected));
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
