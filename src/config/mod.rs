//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (PORT, MONGODB_URI, NODE_ENV)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults so the gateway runs with no config at all
//! - Environment variables win over the file, matching the deployment story
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::DatabaseConfig;
pub use schema::DiagnosticsMode;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
