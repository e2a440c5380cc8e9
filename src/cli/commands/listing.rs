//! List-files command implementation
//!
//! This module implements the `list-files` command, a small utility that
//! enumerates the files published on a static HTTP index page. It does not
//! touch the export control loop.

use crate::adapters::listing::fetch_file_listing;
use clap::Args;

/// Arguments for the list-files command
#[derive(Args, Debug)]
pub struct ListFilesArgs {
    /// URL of the static index page to enumerate
    pub url: String,
}

impl ListFilesArgs {
    /// Execute the list-files command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(url = %self.url, "Fetching file listing");

        let links = match fetch_file_listing(&self.url).await {
            Ok(links) => links,
            Err(e) => {
                eprintln!("Failed to fetch listing: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        if links.is_empty() {
            println!("No files listed at {}", self.url);
            return Ok(0);
        }

        for link in &links {
            println!("{link}");
        }
        tracing::info!(count = links.len(), "Listed files");

        Ok(0)
    }
}
