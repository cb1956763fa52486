//! Unified error type for the donation service.
//!
//! Store operations, configuration loading and the HTTP layer all return
//! [`Result`]. The HTTP layer turns each variant into a status code in
//! [`crate::http::error`].

use crate::core::validation::ValidationErrors;
use thiserror::Error;

/// Every failure the service can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or holds invalid values
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Failure reported by `SeaORM` or the underlying `SQLite` driver
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// One or more donation fields failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No donation exists with the requested id
    #[error("Donation not found: {id}")]
    DonationNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Request body was not parseable JSON
    #[error("Malformed request body: {message}")]
    MalformedBody {
        /// Parser message
        message: String,
    },

    /// Binding the listener or reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
