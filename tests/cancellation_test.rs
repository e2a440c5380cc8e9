//! Integration tests for cooperative cancellation
//!
//! Cancellation is requested from outside the run and observed at loop
//! boundaries only. These tests hold the source at a known point with a
//! gate, cancel, and verify that nothing fetched after the request reaches
//! the output file.

use async_trait::async_trait;
use curator::adapters::catalog::PagedSource;
use curator::config::{
    ApplicationConfig, CatalogConfig, CredentialsConfig, CuratorConfig, ExportConfig, FieldSpec,
    LoggingConfig, WarningsConfig,
};
use curator::core::export::{ExportController, OBJECTS_FILE_NAME};
use curator::core::progress::NullProgress;
use curator::core::state::{ExportStatus, StatusStore};
use curator::domain::{CatalogError, RawItem};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;

/// Source that pauses before serving the item at `gate_at` until the gate
/// opens, letting tests cancel at a deterministic point in the run.
struct GatedSource {
    items: Vec<serde_json::Value>,
    gate_at: usize,
    gate: watch::Receiver<bool>,
    cursor: usize,
}

#[async_trait]
impl PagedSource for GatedSource {
    async fn count(&mut self) -> Result<u64, CatalogError> {
        Ok(self.items.len() as u64)
    }

    async fn has_more(&mut self) -> Result<bool, CatalogError> {
        if self.cursor == self.gate_at {
            let mut gate = self.gate.clone();
            gate.wait_for(|open| *open)
                .await
                .map_err(|e| CatalogError::Collection(e.to_string()))?;
        }
        Ok(self.cursor < self.items.len())
    }

    async fn next(&mut self) -> Result<Option<RawItem>, CatalogError> {
        let index = self.cursor;
        if index >= self.items.len() {
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(RawItem::new(self.items[index].clone())))
    }
}

fn config_for(output: &Path) -> CuratorConfig {
    CuratorConfig {
        application: ApplicationConfig::default(),
        catalog: CatalogConfig {
            api_url: "https://catalog.example.org/api/v1".to_string(),
            page_size: 50,
            timeout_seconds: 30,
            tls_verify: true,
        },
        credentials: CredentialsConfig::default(),
        export: ExportConfig {
            output_directory: output.to_path_buf(),
            fields: vec![
                FieldSpec {
                    name: "idno".to_string(),
                    primary_key: true,
                    required: false,
                    enumerated: false,
                },
                FieldSpec {
                    name: "title".to_string(),
                    primary_key: false,
                    required: false,
                    enumerated: false,
                },
            ],
            warnings: WarningsConfig::default(),
            debug_limit: None,
            max_consecutive_fetch_failures: 10,
        },
        logging: LoggingConfig::default(),
    }
}

fn run_dir(output: &Path) -> PathBuf {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(output)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    assert_eq!(dirs.len(), 1);
    dirs.remove(0)
}

#[tokio::test]
async fn cancel_during_iteration_yields_cancelled_and_stops_writes() {
    let output = TempDir::new().unwrap();
    let (gate_tx, gate_rx) = watch::channel(false);

    let items: Vec<serde_json::Value> = (0..5)
        .map(|i| json!({"idno": format!("A-{i}"), "title": format!("Object {i}")}))
        .collect();

    let source = GatedSource {
        items,
        gate_at: 2,
        gate: gate_rx,
        cursor: 0,
    };

    let controller = Arc::new(
        ExportController::with_source(
            config_for(output.path()),
            Box::new(source),
            Arc::new(NullProgress),
        )
        .unwrap(),
    );

    let runner = controller.clone();
    let handle = tokio::spawn(async move { runner.export_csv().await });

    // Wait until the first two items are through and the run is parked at
    // the gate, then request cancellation and release the gate.
    while controller.status().processed < 2 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    controller.cancel_export();
    gate_tx.send(true).unwrap();

    let snapshot = handle.await.unwrap().unwrap();
    assert_eq!(snapshot.status, ExportStatus::Cancelled);
    assert!(!snapshot.active);
    assert_eq!(snapshot.processed, 2);

    // No row for any item fetched after the cancellation request.
    let dir = run_dir(output.path());
    let contents = std::fs::read_to_string(dir.join(OBJECTS_FILE_NAME)).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3); // header + two rows
    assert_eq!(lines[1], "A-0,Object 0");
    assert_eq!(lines[2], "A-1,Object 1");

    let meta = StatusStore::load(&dir).unwrap();
    assert_eq!(meta.status, ExportStatus::Cancelled);
    assert_eq!(meta.processed_objects, 2);
}

#[tokio::test]
async fn cancellation_is_persisted_immediately() {
    let output = TempDir::new().unwrap();
    let (gate_tx, gate_rx) = watch::channel(false);

    let items: Vec<serde_json::Value> =
        (0..3).map(|i| json!({"idno": format!("A-{i}")})).collect();

    let source = GatedSource {
        items,
        gate_at: 1,
        gate: gate_rx,
        cursor: 0,
    };

    let controller = Arc::new(
        ExportController::with_source(
            config_for(output.path()),
            Box::new(source),
            Arc::new(NullProgress),
        )
        .unwrap(),
    );

    let runner = controller.clone();
    let handle = tokio::spawn(async move { runner.export_csv().await });

    while controller.status().processed < 1 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    controller.cancel_export();

    // Persisted before the loop has even observed the request.
    let meta = StatusStore::load(&run_dir(output.path())).unwrap();
    assert_eq!(meta.status, ExportStatus::Cancelled);

    gate_tx.send(true).unwrap();
    let snapshot = handle.await.unwrap().unwrap();
    assert_eq!(snapshot.status, ExportStatus::Cancelled);
}

#[tokio::test]
async fn repeated_cancellation_is_idempotent() {
    let output = TempDir::new().unwrap();
    let (gate_tx, gate_rx) = watch::channel(false);

    let items: Vec<serde_json::Value> =
        (0..3).map(|i| json!({"idno": format!("A-{i}")})).collect();

    let source = GatedSource {
        items,
        gate_at: 1,
        gate: gate_rx,
        cursor: 0,
    };

    let controller = Arc::new(
        ExportController::with_source(
            config_for(output.path()),
            Box::new(source),
            Arc::new(NullProgress),
        )
        .unwrap(),
    );

    let runner = controller.clone();
    let handle = tokio::spawn(async move { runner.export_csv().await });

    while controller.status().processed < 1 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    controller.cancel_export();
    controller.cancel_export();
    controller.cancel_export();
    gate_tx.send(true).unwrap();

    let snapshot = handle.await.unwrap().unwrap();
    assert_eq!(snapshot.status, ExportStatus::Cancelled);
    assert_eq!(snapshot.processed, 1);
}
