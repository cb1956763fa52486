//! Application configuration loading from config.toml and the environment.
//!
//! The TOML file is optional; every setting has a default. Environment variables
//! (`BIND_ADDRESS`, `ALLOWED_ORIGINS`, `STORAGE_BACKEND`, `DATABASE_URL`) override the
//! file, which lets a `.env` file or the deployment environment adjust a checked-in
//! configuration.

use crate::{
    config::database::DEFAULT_DATABASE_URL,
    entities::DonationType,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{io::ErrorKind, path::Path};
use tracing::{debug, info};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "DONATIONS_CONFIG";

/// Config file used when `DONATIONS_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Which store to use and where it keeps its data
    pub storage: StorageConfig,
    /// Donations inserted at startup when the store is empty
    pub seed: Vec<SeedDonation>,
}

/// HTTP listener settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`
    pub bind_address: String,
    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `SQLite` table through `SeaORM`
    #[default]
    Sqlite,
    /// Process memory, lost on restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config {
                message: format!("Unknown storage backend '{other}', expected sqlite or memory"),
            }),
        }
    }
}

/// Storage settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to use
    pub backend: StorageBackend,
    /// `SeaORM` connection URL, only used by the `SQLite` backend
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// A donation to insert into an empty store at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDonation {
    /// Name of the donor
    pub donor_name: String,
    /// Kind of contribution
    pub donation_type: DonationType,
    /// Amount or quantity
    pub amount: f64,
    /// Day of the donation as a `"YYYY-MM-DD"` string; today when omitted
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Overrides settings with the values `lookup` returns for the known variables.
    ///
    /// `lookup` is normally `std::env::var(..).ok()`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind_address) = lookup("BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(database_url) = lookup("DATABASE_URL") {
            self.storage.database_url = database_url;
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file, falling back to defaults if the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {}", path.display());
    match std::fs::read_to_string(path) {
        Ok(contents) => AppConfig::from_toml(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config file at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(e) => Err(Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        }),
    }
}

/// Loads the config file named by `DONATIONS_CONFIG` (default ./config.toml) and applies
/// environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    config.apply_overrides(|name| std::env::var(name).ok())?;
    info!(
        backend = ?config.storage.backend,
        bind_address = %config.server.bind_address,
        seeds = config.seed.len(),
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind_address = "0.0.0.0:9000"
            allowed_origins = ["https://shelter.example"]

            [storage]
            backend = "memory"

            [[seed]]
            donor_name = "Initial Donor"
            donation_type = "food"
            amount = 50.0

            [[seed]]
            donor_name = "Jane Doe"
            donation_type = "money"
            amount = 100.0
            date = "2025-10-07"
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.server.allowed_origins, vec!["https://shelter.example"]);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_url, DEFAULT_DATABASE_URL);

        assert_eq!(config.seed.len(), 2);
        assert_eq!(config.seed[0].donation_type, DonationType::Food);
        assert!(config.seed[0].date.is_none());
        assert_eq!(config.seed[1].amount, 100.0);
        assert_eq!(config.seed[1].date, NaiveDate::from_ymd_opt(2025, 10, 7));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8000");
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.seed.is_empty());
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let result = AppConfig::from_toml("[storage]\nbackend = \"postgres\"");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("does/not/exist/config.toml").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BIND_ADDRESS", "0.0.0.0:8080"),
            ("ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("STORAGE_BACKEND", "Memory"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| env.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_unknown_backend_override_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "STORAGE_BACKEND").then(|| "redis".to_string())
        });
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
