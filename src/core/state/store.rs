//! Run status persistence
//!
//! This module defines the export status enum, the persisted run metadata
//! record, and the store that writes it through to `meta.json` on every
//! mutation.

use crate::domain::{CuratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the metadata file inside a run directory.
pub const META_FILE_NAME: &str = "meta.json";

/// Export run status
///
/// Starts at `Incomplete` and transitions to exactly one terminal value.
/// The store refuses further mutations once a terminal value is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportStatus {
    /// The run is in progress (or was interrupted by a crash)
    #[default]
    Incomplete,
    /// The run exported every available item
    Completed,
    /// The run was cancelled cooperatively
    Cancelled,
    /// The run aborted on a whole-run failure
    Error,
}

impl ExportStatus {
    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExportStatus::Incomplete)
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportStatus::Incomplete => "INCOMPLETE",
            ExportStatus::Completed => "COMPLETED",
            ExportStatus::Cancelled => "CANCELLED",
            ExportStatus::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Persisted run metadata
///
/// Mirrors the counters the controller tracks in memory. The camelCase
/// field names are the on-disk contract of `meta.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RunMeta {
    /// Run status
    pub status: ExportStatus,

    /// Total number of objects the run expects to process
    pub total_objects: u64,

    /// Number of objects processed so far
    pub processed_objects: u64,
}

/// Write-through store for run metadata
///
/// Every setter rewrites `meta.json` immediately, so a crash mid-run leaves
/// an accurate-as-of-last-write snapshot on disk.
pub struct StatusStore {
    path: PathBuf,
    meta: RunMeta,
}

impl StatusStore {
    /// Create a store bound to a run directory and persist the initial
    /// `INCOMPLETE` record.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial write fails.
    pub fn create(run_dir: &Path) -> Result<Self> {
        let store = Self {
            path: run_dir.join(META_FILE_NAME),
            meta: RunMeta::default(),
        };
        store.persist()?;
        Ok(store)
    }

    /// Load the metadata record from a run directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not parse.
    pub fn load(run_dir: &Path) -> Result<RunMeta> {
        let path = run_dir.join(META_FILE_NAME);
        let contents = fs::read_to_string(&path).map_err(|e| {
            CuratorError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let meta: RunMeta = serde_json::from_str(&contents)?;
        Ok(meta)
    }

    /// Current in-memory metadata.
    pub fn meta(&self) -> &RunMeta {
        &self.meta
    }

    /// Set the run status and write through.
    ///
    /// A terminal status is written at most once: attempts to change an
    /// already-terminal status are ignored with a warning. Re-setting the
    /// same value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_status(&mut self, status: ExportStatus) -> Result<()> {
        if self.meta.status == status {
            return Ok(());
        }
        if self.meta.status.is_terminal() {
            tracing::warn!(
                current = %self.meta.status,
                requested = %status,
                "Ignoring status change after terminal status"
            );
            return Ok(());
        }
        self.meta.status = status;
        self.persist()
    }

    /// Set the expected total and write through.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_total(&mut self, total: u64) -> Result<()> {
        self.meta.total_objects = total;
        self.persist()
    }

    /// Set the processed counter and write through.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_processed(&mut self, processed: u64) -> Result<()> {
        self.meta.processed_objects = processed;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.meta)?;
        fs::write(&self.path, json).map_err(|e| {
            CuratorError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_incomplete() {
        let dir = TempDir::new().unwrap();
        let _store = StatusStore::create(dir.path()).unwrap();

        let meta = StatusStore::load(dir.path()).unwrap();
        assert_eq!(meta.status, ExportStatus::Incomplete);
        assert_eq!(meta.total_objects, 0);
        assert_eq!(meta.processed_objects, 0);
    }

    #[test]
    fn test_setters_write_through() {
        let dir = TempDir::new().unwrap();
        let mut store = StatusStore::create(dir.path()).unwrap();

        store.set_total(42).unwrap();
        store.set_processed(7).unwrap();
        store.set_status(ExportStatus::Completed).unwrap();

        let meta = StatusStore::load(dir.path()).unwrap();
        assert_eq!(meta.total_objects, 42);
        assert_eq!(meta.processed_objects, 7);
        assert_eq!(meta.status, ExportStatus::Completed);
    }

    #[test]
    fn test_terminal_status_is_sticky() {
        let dir = TempDir::new().unwrap();
        let mut store = StatusStore::create(dir.path()).unwrap();

        store.set_status(ExportStatus::Cancelled).unwrap();
        store.set_status(ExportStatus::Completed).unwrap();

        let meta = StatusStore::load(dir.path()).unwrap();
        assert_eq!(meta.status, ExportStatus::Cancelled);
    }

    #[test]
    fn test_same_status_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = StatusStore::create(dir.path()).unwrap();

        store.set_status(ExportStatus::Cancelled).unwrap();
        // Finalization writes the same terminal value again
        store.set_status(ExportStatus::Cancelled).unwrap();
        assert_eq!(store.meta().status, ExportStatus::Cancelled);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = RunMeta {
            status: ExportStatus::Error,
            total_objects: 10,
            processed_objects: 3,
        };

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"status\":\"ERROR\""));
        assert!(json.contains("\"totalObjects\":10"));
        assert!(json.contains("\"processedObjects\":3"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(StatusStore::load(dir.path()).is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExportStatus::Incomplete.to_string(), "INCOMPLETE");
        assert_eq!(ExportStatus::Completed.to_string(), "COMPLETED");
        assert_eq!(ExportStatus::Cancelled.to_string(), "CANCELLED");
        assert_eq!(ExportStatus::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_is_terminal() {
        assert!(!ExportStatus::Incomplete.is_terminal());
        assert!(ExportStatus::Completed.is_terminal());
        assert!(ExportStatus::Cancelled.is_terminal());
        assert!(ExportStatus::Error.is_terminal());
    }
}
