//! Export command implementation
//!
//! This module implements the `export` command for snapshotting the remote
//! catalog into a CSV run directory.

use crate::config::load_config;
use crate::core::export::ExportController;
use crate::core::state::ExportStatus;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the item limit (debug_limit) for this run
    #[arg(long)]
    pub limit: Option<u64>,

    /// Override the output directory for this run
    #[arg(long)]
    pub output: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(limit) = self.limit {
            tracing::info!(limit, "Overriding debug limit from CLI");
            config.export.debug_limit = Some(limit);
        }
        if let Some(ref output) = self.output {
            tracing::info!(output = %output, "Overriding output directory from CLI");
            config.export.output_directory = output.into();
        }

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Catalog: {}", config.catalog.api_url);
            println!("  Output: {}", config.export.output_directory.display());
            println!("  Fields: {}", config.export.field_names().join(", "));
            if let Some(limit) = config.export.debug_limit {
                println!("  Limit: {limit}");
            }
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Create the export controller
        tracing::info!("Creating export controller");
        let controller = match ExportController::new(config) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export controller");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Forward the shutdown signal as a cooperative cancellation request
        let canceller = controller.clone();
        let mut shutdown_signal = shutdown_signal;
        tokio::spawn(async move {
            while shutdown_signal.changed().await.is_ok() {
                if *shutdown_signal.borrow() {
                    canceller.cancel_export();
                    break;
                }
            }
        });

        // Execute export
        println!("🚀 Starting export...");
        println!();

        let snapshot = match controller.export_csv().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Status: {}", snapshot.status);
        println!("  Processed: {}", snapshot.processed);
        println!("  Total: {}", snapshot.total);
        if let Some(ref csv) = snapshot.csv {
            println!("  Output: {}", csv.display());
        }
        println!();

        // Determine exit code
        let exit_code = match snapshot.status {
            ExportStatus::Completed => {
                println!("✅ Export completed successfully!");
                0
            }
            ExportStatus::Cancelled => {
                println!("⚠️  Export cancelled. Partial output kept in the run directory.");
                130 // SIGINT exit code (standard Unix convention)
            }
            ExportStatus::Error => {
                println!("❌ Export failed. Check the run directory and logs.");
                1
            }
            ExportStatus::Incomplete => 1,
        };

        Ok(exit_code)
    }
}
