// Curator - Collection catalog to CSV export tool
// Copyright (c) 2026 Curator Contributors
// Licensed under the MIT License

//! # Curator - Catalog to CSV Export
//!
//! Curator exports the full contents of a remote, paginated
//! collection-management catalog into a flat CSV file, alongside a report of
//! data-quality warnings and a small persisted status record.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Counting** and **iterating** a remote catalog page-by-page
//! - **Transforming** each raw item into a flat record, with a repair pass
//!   for a known upstream encoding defect
//! - **Writing** records as rows of `objects.csv` in configured field order
//! - **Collecting** data-quality warnings into `warnings.csv`
//! - **Persisting** run status and counters into `meta.json`, write-through
//!
//! ## Architecture
//!
//! Curator follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export loop, records, sinks, warnings, state)
//! - [`adapters`] - External integrations (catalog API, file listings)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use curator::config::load_config;
//! use curator::core::export::ExportController;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("curator.toml")?;
//!
//!     // Create the export controller
//!     let controller = ExportController::new(config)?;
//!
//!     // Execute export
//!     let snapshot = controller.export_csv().await?;
//!
//!     println!("Exported {} of {} objects ({})",
//!         snapshot.processed, snapshot.total, snapshot.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Semantics
//!
//! `export_csv` rejects only on configuration and output-directory errors.
//! Every failure discovered during the run - counting, fetching, writing -
//! converts into the terminal `ERROR` status and the call still resolves
//! with a status snapshot. Callers detect a failed run by inspecting
//! `status`, not by catching an error.
//!
//! ## Cancellation
//!
//! [`core::export::ExportController::cancel_export`] requests cooperative
//! cancellation. The control loop observes the request at its next
//! iteration boundary; an in-flight fetch always completes first.
//!
//! ## Logging
//!
//! Curator uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting export");
//! warn!(primary_key = "1999.4.12", "Item fetch failed, skipping");
//! error!(error = "count failed", "Export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
