//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_PATH: &str = "friendconnect.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("unknown STORAGE_BACKEND: {0} (expected 'file', 'memory' or 'postgres')")]
    UnknownBackend(String),
    #[error("DATABASE_URL required for STORAGE_BACKEND=postgres")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File { path: PathBuf },
    Postgres { database_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub storage: StorageBackend,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `STORAGE_BACKEND`: `file` (default), `memory` or `postgres`
    /// - `STORAGE_PATH`: data file for the file backend
    /// - `DATABASE_URL`: required for the postgres backend
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed, or a required
    /// value for the chosen backend is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let storage = parse_backend(
            std::env::var("STORAGE_BACKEND").ok().as_deref(),
            std::env::var("STORAGE_PATH").ok(),
            std::env::var("DATABASE_URL").ok(),
        )?;
        Ok(Self { port, storage })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value.to_string())),
    }
}

fn parse_backend(
    raw: Option<&str>,
    storage_path: Option<String>,
    database_url: Option<String>,
) -> Result<StorageBackend, ConfigError> {
    match raw.map(str::trim).unwrap_or("file") {
        "memory" => Ok(StorageBackend::Memory),
        "file" => {
            let path = storage_path
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());
            Ok(StorageBackend::File { path: PathBuf::from(path) })
        }
        "postgres" => database_url
            .filter(|url| !url.trim().is_empty())
            .map(|database_url| StorageBackend::Postgres { database_url })
            .ok_or(ConfigError::MissingDatabaseUrl),
        other => Err(ConfigError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
