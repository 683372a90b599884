//! Semantic validation of a deserialized configuration.

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

fn invalid(field: &str, reason: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Check constraints serde cannot express.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(invalid("listener.port", "must be non-zero"));
    }

    if !config.database.uri.starts_with("mongodb://")
        && !config.database.uri.starts_with("mongodb+srv://")
    {
        errors.push(invalid(
            "database.uri",
            "must be a mongodb:// or mongodb+srv:// connection string",
        ));
    }

    if config.database.server_selection_timeout_ms == 0 {
        errors.push(invalid(
            "database.server_selection_timeout_ms",
            "must be non-zero",
        ));
    }

    if config.cors.allowed_origins.is_empty() {
        errors.push(invalid("cors.allowed_origins", "must not be empty"));
    }

    if config.http.body_limit_bytes == 0 {
        errors.push(invalid("http.body_limit_bytes", "must be non-zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
