//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Curator configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Catalog: {}", config.catalog.api_url);
        println!("  Page Size: {}", config.catalog.page_size);
        println!("  Output: {}", config.export.output_directory.display());
        println!("  Fields: {}", config.export.field_names().join(", "));
        println!(
            "  Primary Key: {}",
            config.export.primary_key_field().unwrap_or("<none>")
        );
        if let Some(limit) = config.export.debug_limit {
            println!("  Debug Limit: {limit}");
        }
        println!(
            "  Warnings: singleton={} missing={} unused={}",
            config.export.warnings.singleton_fields,
            config.export.warnings.missing_fields,
            config.export.warnings.unused_fields
        );

        Ok(0)
    }
}
