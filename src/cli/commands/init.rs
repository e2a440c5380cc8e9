//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "curator.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Curator configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your catalog URL and fields", self.output);
                println!("  2. Set credentials in the environment:");
                println!("     - CURATOR_API_KEY");
                println!("     - CURATOR_API_PASSWORD");
                println!("  3. Validate configuration: curator validate-config");
                println!("  4. Run export: curator export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

const SAMPLE_CONFIG: &str = r#"# Curator Configuration File
# Collection catalog to CSV export tool

[application]
log_level = "info"

[catalog]
api_url = "https://catalog.example.org/api/v1"
page_size = 50
timeout_seconds = 30

[credentials]
key = "${CURATOR_API_KEY}"
username = "exporter"
password = "${CURATOR_API_PASSWORD}"

[export]
output_directory = "./exports"
# Abort the run after this many consecutive item-fetch failures
max_consecutive_fetch_failures = 10
# Uncomment to truncate the run for testing
# debug_limit = 25

# Fields are exported in the order they appear below.
# Exactly one field must be flagged primary_key.
[[export.fields]]
name = "idno"
primary_key = true
required = true

[[export.fields]]
name = "title"
required = true

[[export.fields]]
name = "object_type"
enumerated = true

[[export.fields]]
name = "medium"

[export.warnings]
singleton_fields = true
missing_fields = true
unused_fields = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#;
