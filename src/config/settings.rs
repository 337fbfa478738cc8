//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from an optional TOML file and environment
//! variables (prefix `AIDTRACK`, section separator `__`).

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Postgres connection URL assembled from the configured parts.
    pub fn url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}/{}",
            self.user, self.password, self.host, self.name
        )
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub secret_key: String,
    pub cookie_secure: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from defaults, an optional configuration file and
    /// environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.debug", false)?
            .set_default("database.host", "localhost")?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.name", "aidtrack_db")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default(
                "session.secret_key",
                "change-this-development-secret-key-now",
            )?
            .set_default("session.cookie_secure", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.file_path", "logs")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("AIDTRACK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AidtrackError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                debug: false,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                user: "postgres".to_string(),
                password: String::new(),
                name: "aidtrack_db".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            session: SessionConfig {
                secret_key: "change-this-development-secret-key-now".to_string(),
                cookie_secure: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn database_url_is_assembled_from_parts() {
        let settings = Settings::default();
        assert_eq!(
            settings.database.url(),
            "postgresql://postgres:@localhost/aidtrack_db"
        );
    }
}
