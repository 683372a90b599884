//! Reservation Gateway
//!
//! Bootstrap and request-dispatch layer of a small reservation-management
//! API, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                     GATEWAY                      │
//!  Client Request  │  ┌──────┐   ┌───────────┐   ┌────────────────┐  │
//!  ────────────────┼─▶│ cors │──▶│ body limit│──▶│ routes (/api/..│  │
//!                  │  │engine│   │           │   │  reservations,  │  │
//!                  │  └──┬───┘   └───────────┘   │ tables, notif.) │  │
//!                  │     │ OPTIONS: 204          └────────┬────────┘  │
//!                  │     ▼                                ▼           │
//!                  │  pre-flight answered       ┌────────────────┐    │
//!                  │                            │ db::Connection │────┼──▶ MongoDB
//!  Client Response │  ┌───────────────┐         │    Manager     │    │
//!  ◀───────────────┼──│ error         │◀────────┴────────────────┘    │
//!                  │  │ normalizer    │  diagnostics: /, /api/health, │
//!                  │  └───────────────┘  /api/cors-test, 404 fallback │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline is assembled from an explicit ordered stage plan (see
//! [`pipeline`]) validated before the listener starts: CORS first, catch-all
//! 404 after the real routes, error backstop wrapping everything.

// Core subsystems
pub mod config;
pub mod cors;
pub mod db;
pub mod http;
pub mod pipeline;
pub mod routes;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::GatewayConfig;
pub use db::{ConnectionManager, ConnectionState};
pub use http::GatewayServer;
