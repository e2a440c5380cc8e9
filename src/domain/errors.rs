//! Domain error types
//!
//! This module defines the error hierarchy for Curator. All errors are
//! domain-specific and don't expose third-party types such as the HTTP
//! client's error type.

use thiserror::Error;

/// Main Curator error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catalog-related errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog-specific errors
///
/// Errors that occur when talking to the remote catalog. The two main
/// variants carry different recovery policies in the export control loop:
/// `Collection` aborts the whole run, `Item` skips the item and continues.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Counting the collection or checking for remaining items failed.
    /// Fatal for the run.
    #[error("Collection query failed: {0}")]
    Collection(String),

    /// Fetching a single item failed. Recoverable; the loop skips the item.
    #[error("Item fetch failed: {0}")]
    Item(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Whether this error aborts the whole run rather than skipping one item.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CatalogError::Item(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CuratorError {
    fn from(err: std::io::Error) -> Self {
        CuratorError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CuratorError {
    fn from(err: serde_json::Error) -> Self {
        CuratorError::Serialization(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for CuratorError {
    fn from(err: csv::Error) -> Self {
        CuratorError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CuratorError {
    fn from(err: toml::de::Error) -> Self {
        CuratorError::Configuration(format!("TOML parse error: {err}"))
    }
}
