//! Cross-origin policy subsystem.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → engine.rs (read Origin header)
//!     → policy.rs (exact match against allow-list)
//!     → matched: emit Access-Control-* headers on the response
//!     → unmatched: pass through untouched (browser enforces rejection)
//!
//! OPTIONS pre-flight:
//!     → answered directly with 204 + headers, never reaches routes
//! ```
//!
//! # Design Decisions
//! - Exact string matching only; no wildcard or subdomain rules
//! - Unmatched origins are not hard-blocked at the server
//! - Policy is immutable after startup; the engine is stateless per request

pub mod engine;
pub mod policy;

pub use policy::CorsPolicy;
