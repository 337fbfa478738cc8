//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{AidtrackError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_session_config(&settings.session)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(AidtrackError::Config("Bind host is required".to_string()));
    }

    if config.port == 0 {
        return Err(AidtrackError::Config(
            "Bind port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(AidtrackError::Config(
            "Database host is required".to_string(),
        ));
    }

    if config.user.is_empty() {
        return Err(AidtrackError::Config(
            "Database user is required".to_string(),
        ));
    }

    if config.name.is_empty() {
        return Err(AidtrackError::Config(
            "Database name is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(AidtrackError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(AidtrackError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    // The cookie signing key is derived from this value and needs at least
    // 32 bytes of input.
    if config.secret_key.len() < 32 {
        return Err(AidtrackError::Config(
            "Session secret key must be at least 32 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AidtrackError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AidtrackError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    if config.file_path.is_empty() {
        return Err(AidtrackError::Config(
            "Log file path is required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn short_session_secret_is_rejected() {
        let mut settings = Settings::default();
        settings.session.secret_key = "too-short".to_string();
        assert_matches!(
            validate_settings(&settings),
            Err(AidtrackError::Config(msg)) if msg.contains("secret key")
        );
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(AidtrackError::Config(_)));
    }

    #[test]
    fn inverted_pool_bounds_are_rejected() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        assert_matches!(validate_settings(&settings), Err(AidtrackError::Config(_)));
    }
}
