//! Data-store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     bootstrap spawns connect()
//!     → state: Disconnected → Connecting
//!     → ping with server-selection timeout
//!     → Connected(db name)  or  Failed(error) → fatal exit
//!
//! Per request:
//!     route collaborator → database() → handle, or fail fast when not
//!     Connected (no command buffering)
//!
//! Shutdown:
//!     close() exactly once, awaited before process exit
//! ```

pub mod connection;
pub mod state;

pub use connection::{ConnectionManager, StoreError};
pub use state::ConnectionState;
