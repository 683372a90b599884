//! HTTP pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (router assembly from the stage plan, serve loop)
//!     → request.rs (x-request-id as early as possible)
//!     → cors engine → body limit → routes / diagnostics.rs
//!     → error.rs (uniform JSON envelopes, panic backstop)
//!     → Send to client
//! ```

pub mod diagnostics;
pub mod error;
pub mod request;
pub mod server;

pub use error::{ErrorNormalizer, ErrorResponse, GatewayError};
pub use request::{MakeGatewayRequestId, X_REQUEST_ID};
pub use server::{AppState, GatewayServer};
