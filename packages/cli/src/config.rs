use std::num::ParseIntError;
use std::path::PathBuf;

use axum::http::HeaderValue;
use cmdvault_config::constants::{
    CLIENT_DIST, CORS_ORIGIN, DB_PATH, DEFAULT_CLIENT_DIST, DEFAULT_DB_PATH, DEFAULT_PORT, PORT,
};
use cmdvault_config::optional_env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

/// Server settings resolved from the environment and command-line flags
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub client_dist: PathBuf,
    /// `None` allows any origin
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match optional_env(PORT) {
            Some(raw) => validate_port(raw.parse::<u16>()?)?,
            None => DEFAULT_PORT,
        };

        let db_path = optional_env(DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let client_dist =
            optional_env(CLIENT_DIST).unwrap_or_else(|| DEFAULT_CLIENT_DIST.to_string());

        let cors_origin = optional_env(CORS_ORIGIN);
        if let Some(origin) = &cors_origin {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
        }

        Ok(Config {
            port,
            db_path: PathBuf::from(db_path),
            client_dist: PathBuf::from(client_dist),
            cors_origin,
        })
    }

    /// Apply command-line flags on top of the environment values
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        db_path: Option<PathBuf>,
        client_dist: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = port {
            self.port = validate_port(port)?;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(client_dist) = client_dist {
            self.client_dist = client_dist;
        }
        Ok(self)
    }
}

fn validate_port(port: u16) -> Result<u16, ConfigError> {
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}
