//! Configuration management for Curator.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Curator uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Example Configuration
//!
//! ```toml
//! [catalog]
//! api_url = "https://catalog.example.org/api/v1"
//! page_size = 50
//!
//! [credentials]
//! key = "${CURATOR_API_KEY}"
//! username = "exporter"
//! password = "${CURATOR_API_PASSWORD}"
//!
//! [export]
//! output_directory = "./exports"
//!
//! [[export.fields]]
//! name = "idno"
//! primary_key = true
//! required = true
//!
//! [[export.fields]]
//! name = "title"
//!
//! [export.warnings]
//! missing_fields = true
//! singleton_fields = true
//! ```
//!
//! # Validation
//!
//! Configuration is validated on load:
//!
//! ```rust,no_run
//! use curator::config::load_config;
//!
//! # fn example() {
//! match load_config("curator.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatalogConfig, CredentialsConfig, CuratorConfig, ExportConfig, FieldSpec,
    LoggingConfig, WarningsConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
