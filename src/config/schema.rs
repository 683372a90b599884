//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

use crate::cors::CorsPolicy;

/// Root configuration for the reservation gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, port).
    pub listener: ListenerConfig,

    /// Data-store connection settings.
    pub database: DatabaseConfig,

    /// Cross-origin access policy.
    pub cors: CorsPolicy,

    /// HTTP pipeline settings (body limits).
    pub http: HttpConfig,

    /// Environment name; controls error-detail exposure.
    pub environment: EnvironmentConfig,
}

impl GatewayConfig {
    /// Diagnostics mode derived from the configured environment name.
    pub fn diagnostics_mode(&self) -> DiagnosticsMode {
        self.environment.mode()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub host: String,

    /// Listener port.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// Data-store connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub uri: String,

    /// Abort the connect attempt after this long without a reachable server.
    pub server_selection_timeout_ms: u64,

    /// Timeout for establishing individual socket connections.
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/reservations".to_string(),
            server_selection_timeout_ms: 10_000,
            connect_timeout_ms: 10_000,
        }
    }
}

/// HTTP pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            // Matches the 10mb body limit of the original deployment.
            body_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Environment name wrapper.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub name: String,
}

impl EnvironmentConfig {
    pub fn mode(&self) -> DiagnosticsMode {
        if self.name == "development" {
            DiagnosticsMode::Development
        } else {
            DiagnosticsMode::Production
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: "development".to_string(),
        }
    }
}

/// Controls whether error responses carry the underlying error message.
///
/// Threaded explicitly through the error normalizer rather than read from the
/// process environment at response time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsMode {
    /// Error envelopes include the source error message.
    Development,
    /// Error envelopes carry an empty detail object.
    Production,
}
