//! Run state and status snapshots
//!
//! `RunState` is the controller's owned, transient view of the run in
//! flight; `StatusSnapshot` is the read-only copy handed to callers.

use crate::core::state::ExportStatus;
use std::path::PathBuf;

/// Read-only snapshot of an export run.
///
/// Returned by `ExportController::export_csv` when the run reaches its
/// terminal status, and by `ExportController::status` at any time,
/// including mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Whether the run is still processing items
    pub active: bool,

    /// Path of the CSV output file, once the run has created it
    pub csv: Option<PathBuf>,

    /// Items processed so far
    pub processed: u64,

    /// Expected total (an estimate when the run is debug-limited)
    pub total: u64,

    /// Run status
    pub status: ExportStatus,
}

/// Mutable run state owned by the controller.
///
/// Created when `export_csv` starts and discarded when the call resolves;
/// the status store mirrors the counters on disk.
#[derive(Debug, Default)]
pub(crate) struct RunState {
    pub active: bool,
    pub processed: u64,
    pub total: u64,
    pub limit_output: bool,
    pub csv_path: Option<PathBuf>,
    pub status: ExportStatus,
}

impl RunState {
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            active: self.active,
            csv: self.csv_path.clone(),
            processed: self.processed,
            total: self.total,
            status: self.status,
        }
    }
}
