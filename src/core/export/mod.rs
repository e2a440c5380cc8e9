//! Export orchestration
//!
//! This module provides the export control loop and its status snapshots.

pub mod controller;
pub mod snapshot;

pub use controller::{ExportController, OBJECTS_FILE_NAME, WARNINGS_FILE_NAME};
pub use snapshot::StatusSnapshot;
