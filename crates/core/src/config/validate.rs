use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Service title is not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.service.title.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "service.title cannot be empty".to_string(),
        ));
    }

    Ok(())
}
