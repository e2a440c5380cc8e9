//! Core business logic for Curator.
//!
//! This module contains the export control loop and the collaborators it
//! drives.
//!
//! # Modules
//!
//! - [`export`] - The export controller state machine and status snapshots
//! - [`record`] - Record construction and the encoding repair
//! - [`sink`] - CSV record sink
//! - [`warnings`] - Data-quality warning collector
//! - [`state`] - Run status persistence (`meta.json`)
//! - [`progress`] - Fire-and-forget progress notifications
//!
//! # Export Workflow
//!
//! One run of the control loop:
//!
//! 1. **Create** a fresh timestamped run directory
//! 2. **Initialize** the sink, the warning collector, and the status store
//! 3. **Count** the collection (or adopt the debug limit as the estimate)
//! 4. **Iterate** item-by-item: build the record, write the row, collect
//!    warnings, persist the counter
//! 5. **Finalize** exactly once with COMPLETED, CANCELLED, or ERROR
//!
//! # Example
//!
//! ```rust,no_run
//! use curator::config::load_config;
//! use curator::core::export::ExportController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("curator.toml")?;
//! let controller = ExportController::new(config)?;
//!
//! let snapshot = controller.export_csv().await?;
//! println!("Processed: {} of {} ({})", snapshot.processed, snapshot.total, snapshot.status);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod progress;
pub mod record;
pub mod sink;
pub mod state;
pub mod warnings;
