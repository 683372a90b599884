//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (server.rs):
//!     Load config → Validate → Build pipeline → Bind listener
//!     → spawn store connect (not gated)
//!
//! Shutdown (signals.rs → server.rs):
//!     SIGTERM/SIGINT → stop accepting → drain in-flight requests
//!     → close store connection → exit 0
//!
//! Fatal connect failure:
//!     Failed state → server stops → error value → exit non-zero
//! ```
//!
//! # Design Decisions
//! - Fail fast: a dead store at startup terminates the process, no retry
//! - Shutdown closes the store exactly once, after the drain

pub mod signals;
