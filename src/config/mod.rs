/// Application settings from config.toml and environment variables
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Startup seeding from config.toml
pub mod seed;

pub use app::{AppConfig, StorageBackend, load_app_configuration};
