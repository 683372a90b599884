//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "GATEWAY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {variable}: {value}")]
    Env { variable: String, value: String },

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load the effective configuration.
///
/// Order: file named by `GATEWAY_CONFIG` (if set), else defaults; then
/// `PORT`, `MONGODB_URI` and `NODE_ENV` override the result; finally the
/// merged config is validated.
pub fn load() -> Result<GatewayConfig, ConfigError> {
    let mut config = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_file(Path::new(&path))?,
        Err(_) => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    if let Ok(port) = env::var("PORT") {
        config.listener.port = port.parse().map_err(|_| ConfigError::Env {
            variable: "PORT".to_string(),
            value: port.clone(),
        })?;
    }

    if let Ok(uri) = env::var("MONGODB_URI") {
        config.database.uri = uri;
    }

    if let Ok(name) = env::var("NODE_ENV") {
        config.environment.name = name;
    }

    Ok(())
}
