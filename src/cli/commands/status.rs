//! Status command implementation
//!
//! This module implements the `status` command for displaying the persisted
//! metadata record of an export run.

use crate::config::load_config;
use crate::core::state::StatusStore;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Run directory to inspect (defaults to the most recent run)
    #[arg(long)]
    pub run_dir: Option<PathBuf>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        let run_dir = match &self.run_dir {
            Some(dir) => dir.clone(),
            None => {
                // Fall back to the most recent run under the configured
                // output directory; run names sort chronologically.
                let config = match load_config(config_path) {
                    Ok(c) => c,
                    Err(e) => {
                        println!("❌ Failed to load configuration file");
                        println!("   Error: {e}");
                        return Ok(2); // Configuration error exit code
                    }
                };

                match latest_run_dir(&config.export.output_directory) {
                    Some(dir) => dir,
                    None => {
                        println!("No export history found.");
                        println!("Run 'curator export' to start exporting data.");
                        return Ok(0);
                    }
                }
            }
        };

        let meta = match StatusStore::load(&run_dir) {
            Ok(m) => m,
            Err(e) => {
                println!("❌ Failed to read run metadata");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!("  Run: {}", run_dir.display());
        println!("  Status: {}", meta.status);
        println!("  Total objects: {}", meta.total_objects);
        println!("  Processed objects: {}", meta.processed_objects);

        Ok(0)
    }
}

/// Most recent run directory under the output directory, by name.
fn latest_run_dir(output_directory: &std::path::Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(output_directory).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("export-"))
        })
        .max()
}
