//! Resource route collaborators.
//!
//! Each resource owns its endpoints and is mounted under a path prefix by the
//! bootstrap. Handlers stay thin: shared CRUD in resource.rs, no business
//! validation, errors normalized into the uniform envelope.

pub mod notifications;
pub mod reservations;
pub mod resource;
pub mod tables;
