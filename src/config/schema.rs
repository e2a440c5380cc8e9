//! Configuration schema types
//!
//! This module defines the configuration structure for Curator.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Curator configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Remote catalog connection configuration
    pub catalog: CatalogConfig,

    /// Credentials passed through to the catalog source
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Export settings
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CuratorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Build a configuration from a raw JSON value.
    ///
    /// This is the programmatic entry point: the value must deserialize into
    /// the configuration schema and pass validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not deserialize or fails validation.
    pub fn from_json(value: serde_json::Value) -> crate::domain::Result<Self> {
        let config: CuratorConfig = serde_json::from_value(value).map_err(|e| {
            crate::domain::CuratorError::Configuration(format!("Invalid configuration: {e}"))
        })?;
        config
            .validate()
            .map_err(crate::domain::CuratorError::Configuration)?;
        Ok(config)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Remote catalog connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub api_url: String,

    /// Number of items fetched per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("catalog.api_url must not be empty".to_string());
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| format!("catalog.api_url is not a valid URL: {e}"))?;
        if self.page_size == 0 {
            return Err("catalog.page_size must be at least 1".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("catalog.timeout_seconds must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Credentials for the catalog source
///
/// Opaque to the export core; the HTTP source turns them into request
/// headers. All values are secrecy-wrapped and never logged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialsConfig {
    /// API key, sent as the `X-Api-Key` header when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<SecretString>,

    /// Username for basic authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for basic authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretString>,
}

/// One exported field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as known to the remote catalog
    pub name: String,

    /// Whether this field is the primary key (exactly one field must be)
    #[serde(default)]
    pub primary_key: bool,

    /// Whether a missing value should raise a data-quality warning
    #[serde(default)]
    pub required: bool,

    /// Whether the field is expected to carry enumerated values
    #[serde(default)]
    pub enumerated: bool,
}

/// Data-quality warning flags
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WarningsConfig {
    /// Report fields whose values collapse to a very small distinct set
    #[serde(default)]
    pub singleton_fields: bool,

    /// Report required fields absent from a record
    #[serde(default)]
    pub missing_fields: bool,

    /// Report fields present on items but not exported
    #[serde(default)]
    pub unused_fields: bool,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory under which each run creates its own timestamped directory
    pub output_directory: PathBuf,

    /// Ordered field configuration; order defines the CSV column order
    pub fields: Vec<FieldSpec>,

    /// Data-quality warning flags
    #[serde(default)]
    pub warnings: WarningsConfig,

    /// Cap the run to a fixed number of items, primarily for testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_limit: Option<u64>,

    /// Abort the run after this many consecutive item-fetch failures
    #[serde(default = "default_max_consecutive_fetch_failures")]
    pub max_consecutive_fetch_failures: u32,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("export.fields must not be empty".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("export.fields entries must have a non-empty name".to_string());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Duplicate field name '{}'", field.name));
            }
        }

        let primary_keys = self.fields.iter().filter(|f| f.primary_key).count();
        if primary_keys != 1 {
            return Err(format!(
                "Exactly one field must be flagged primary_key, found {primary_keys}"
            ));
        }

        if self.debug_limit == Some(0) {
            return Err("export.debug_limit must be a positive integer".to_string());
        }

        if self.max_consecutive_fetch_failures == 0 {
            return Err("export.max_consecutive_fetch_failures must be at least 1".to_string());
        }

        Ok(())
    }

    /// Configured field names in column order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Name of the single primary-key field.
    ///
    /// Only meaningful after validation; returns the first flagged field.
    pub fn primary_key_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.primary_key)
            .map(|f| f.name.as_str())
    }

    /// Names of fields flagged required.
    pub fn required_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.clone())
            .collect()
    }

    /// Names of fields expected to carry enumerated values.
    pub fn enumerated_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.enumerated)
            .map(|f| f.name.clone())
            .collect()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation policy (daily, hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> usize {
    50
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_consecutive_fetch_failures() -> u32 {
    10
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
