//! Export controller - the export control loop
//!
//! This module owns the run's lifecycle: it creates the output location,
//! initializes the collaborators, drives the counting phase, iterates the
//! collection item-by-item, applies the error and cancellation policy, and
//! drives exactly one finalization.
//!
//! The run is a state machine: INIT → COUNTING → ITERATING → FINALIZING →
//! one of {COMPLETED, CANCELLED, ERROR}. Failures discovered *during* the
//! run never reject the call; they surface as the terminal `ERROR` status
//! in the resolved snapshot. Only configuration and output-directory
//! failures, which happen before the run has side effects worth reporting,
//! reject the call itself.

use crate::adapters::catalog::{HttpCatalogSource, PagedSource};
use crate::config::CuratorConfig;
use crate::core::export::snapshot::{RunState, StatusSnapshot};
use crate::core::progress::{LogProgress, ProgressChannel};
use crate::core::record::RecordBuilder;
use crate::core::sink::CsvSink;
use crate::core::state::{ExportStatus, StatusStore};
use crate::core::warnings::WarningCollector;
use crate::domain::{CuratorError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Name of the record output file inside a run directory.
pub const OBJECTS_FILE_NAME: &str = "objects.csv";

/// Name of the warning report inside a run directory.
pub const WARNINGS_FILE_NAME: &str = "warnings.csv";

/// Export controller
///
/// One controller drives one export run. Running two controllers
/// concurrently against the same output directory risks a run-directory
/// name collision; nothing guards against that.
pub struct ExportController {
    config: CuratorConfig,
    source: tokio::sync::Mutex<Box<dyn PagedSource>>,
    progress: Arc<dyn ProgressChannel>,
    state: Mutex<RunState>,
    store: Mutex<Option<StatusStore>>,
    cancel_tx: watch::Sender<bool>,
    cancel_rx: watch::Receiver<bool>,
}

impl ExportController {
    /// Create a controller over the HTTP catalog source from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Configuration`] if the configuration is
    /// invalid or the HTTP client cannot be built. No side effect happens
    /// before validation passes.
    pub fn new(config: CuratorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(CuratorError::Configuration)?;
        let source = HttpCatalogSource::new(&config.catalog, config.credentials.clone())?;
        Ok(Self::assemble(config, Box::new(source), Arc::new(LogProgress)))
    }

    /// Create a controller over an injected source and progress channel.
    ///
    /// This is the seam tests (and embedders with their own transports)
    /// use to drive the control loop without a network.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Configuration`] if the configuration is
    /// invalid.
    pub fn with_source(
        config: CuratorConfig,
        source: Box<dyn PagedSource>,
        progress: Arc<dyn ProgressChannel>,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(CuratorError::Configuration)?;
        Ok(Self::assemble(config, source, progress))
    }

    fn assemble(
        config: CuratorConfig,
        source: Box<dyn PagedSource>,
        progress: Arc<dyn ProgressChannel>,
    ) -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        Self {
            config,
            source: tokio::sync::Mutex::new(source),
            progress,
            state: Mutex::new(RunState::default()),
            store: Mutex::new(None),
            cancel_tx,
            cancel_rx,
        }
    }

    /// Execute the export run.
    ///
    /// Creates the timestamped run directory, initializes the sink, the
    /// warning collector and the status store, counts the collection,
    /// iterates it item-by-item, and finalizes exactly once.
    ///
    /// # Errors
    ///
    /// Rejects only on configuration or output-directory failures. Every
    /// failure after that point resolves successfully with terminal status
    /// `ERROR` in the snapshot; callers must inspect `status`.
    pub async fn export_csv(&self) -> Result<StatusSnapshot> {
        // Fresh, time-named output location. Failure here rejects the call
        // before any collaborator is created.
        let run_dir = self.create_run_directory()?;
        let csv_path = run_dir.join(OBJECTS_FILE_NAME);

        tracing::info!(run_dir = %run_dir.display(), "Starting export run");

        let export_cfg = &self.config.export;
        let builder = RecordBuilder::new(export_cfg);
        let mut sink = CsvSink::create(&csv_path, export_cfg.field_names())?;
        let mut warnings =
            WarningCollector::create(&run_dir.join(WARNINGS_FILE_NAME), export_cfg)?;
        *self.lock_store() = Some(StatusStore::create(&run_dir)?);

        {
            let mut state = self.lock_state();
            state.active = true;
            state.processed = 0;
            state.total = 0;
            state.limit_output = export_cfg.debug_limit.is_some();
            state.csv_path = Some(csv_path);
            state.status = ExportStatus::Incomplete;
        }
        self.progress.started();

        // COUNTING. A debug limit stands in for the true collection size;
        // the source is not queried at all in that case.
        let total = match export_cfg.debug_limit {
            Some(limit) => limit,
            None => {
                let counted = { self.source.lock().await.count().await };
                match counted {
                    Ok(count) => count,
                    Err(e) => {
                        tracing::error!(error = %e, "Counting the collection failed");
                        return self.finalize(ExportStatus::Error, sink, warnings);
                    }
                }
            }
        };
        self.lock_state().total = total;
        if let Err(e) = self.persist(|store| store.set_total(total)) {
            tracing::error!(error = %e, "Persisting the total failed");
            return self.finalize(ExportStatus::Error, sink, warnings);
        }

        // ITERATING. An explicit loop with owned state: constant stack
        // usage regardless of collection size.
        let limit = export_cfg.debug_limit.unwrap_or(u64::MAX);
        let limit_output = self.lock_state().limit_output;
        let max_failures = export_cfg.max_consecutive_fetch_failures;
        let mut consecutive_failures: u32 = 0;

        let outcome = loop {
            // Cancellation is cooperative and checked once per iteration;
            // an in-flight fetch always completes first.
            if *self.cancel_rx.borrow() {
                tracing::info!("Cancellation requested, stopping iteration");
                break ExportStatus::Cancelled;
            }

            let has_more = { self.source.lock().await.has_more().await };
            match has_more {
                Err(e) => {
                    tracing::error!(error = %e, "Checking for remaining items failed");
                    break ExportStatus::Error;
                }
                Ok(false) => break ExportStatus::Completed,
                Ok(true) => {}
            }

            let fetched = { self.source.lock().await.next().await };
            let item = match fetched {
                Err(e) if e.is_fatal() => {
                    // Auth and protocol failures cannot heal by skipping
                    tracing::error!(error = %e, "Fatal failure while fetching item");
                    break ExportStatus::Error;
                }
                Err(e) => {
                    consecutive_failures += 1;
                    tracing::warn!(
                        error = %e,
                        consecutive_failures,
                        "Item fetch failed, skipping"
                    );
                    if consecutive_failures >= max_failures {
                        tracing::error!(
                            max_failures,
                            "Consecutive fetch failure bound reached, aborting run"
                        );
                        break ExportStatus::Error;
                    }
                    continue;
                }
                // Defensive end-of-collection signal
                Ok(None) => break ExportStatus::Completed,
                Ok(Some(item)) => item,
            };
            consecutive_failures = 0;

            // A cancellation that landed while the fetch was in flight still
            // wins: once active is false no further record is written. The
            // fetched item is dropped, not persisted.
            if *self.cancel_rx.borrow() {
                tracing::info!("Cancellation requested mid-fetch, dropping item");
                break ExportStatus::Cancelled;
            }

            let primary_key = builder.primary_key_value(&item);
            let record = builder.build(&item);

            if let Err(e) = sink.write(&record) {
                tracing::error!(error = %e, primary_key = %primary_key, "Writing record failed");
                break ExportStatus::Error;
            }
            if let Err(e) = warnings.append_findings(&primary_key, &item, &record) {
                tracing::error!(error = %e, primary_key = %primary_key, "Recording warnings failed");
                break ExportStatus::Error;
            }

            let processed = {
                let mut state = self.lock_state();
                state.processed += 1;
                state.processed
            };
            if let Err(e) = self.persist(|store| store.set_processed(processed)) {
                tracing::error!(error = %e, "Persisting the counter failed");
                break ExportStatus::Error;
            }
            self.progress.progress();
            tracing::debug!(primary_key = %primary_key, processed, total, "Exported item");

            if limit_output && processed >= limit {
                tracing::info!(limit, "Debug limit reached");
                break ExportStatus::Completed;
            }
        };

        self.finalize(outcome, sink, warnings)
    }

    /// Request cooperative cancellation.
    ///
    /// Sets the run inactive and persists status `CANCELLED` immediately;
    /// the loop observes the request at its next boundary check. Idempotent;
    /// a no-op once the run has reached a terminal status.
    pub fn cancel_export(&self) {
        let _ = self.cancel_tx.send(true);

        {
            let mut state = self.lock_state();
            if !state.status.is_terminal() {
                state.active = false;
                state.status = ExportStatus::Cancelled;
            }
        }

        if let Some(store) = self.lock_store().as_mut() {
            if let Err(e) = store.set_status(ExportStatus::Cancelled) {
                tracing::warn!(error = %e, "Persisting cancellation failed");
            }
        }

        tracing::info!("Export cancellation requested");
    }

    /// Read-only snapshot of the run, safe at any time.
    pub fn status(&self) -> StatusSnapshot {
        self.lock_state().snapshot()
    }

    /// Enter finalization exactly once per run: mark the run inactive,
    /// close the output files, notify observers, persist the terminal
    /// status, and resolve with the final snapshot.
    fn finalize(
        &self,
        outcome: ExportStatus,
        sink: CsvSink,
        warnings: WarningCollector,
    ) -> Result<StatusSnapshot> {
        let mut outcome = outcome;

        {
            let mut state = self.lock_state();
            state.active = false;
            if !state.status.is_terminal() {
                state.status = outcome;
            } else {
                // Cancellation won the race; keep the first terminal value.
                outcome = state.status;
            }
        }

        if let Err(e) = sink.end() {
            tracing::error!(error = %e, "Closing the record sink failed");
            outcome = self.degrade_outcome(outcome);
        }
        if let Err(e) = warnings.end() {
            tracing::error!(error = %e, "Closing the warning report failed");
            outcome = self.degrade_outcome(outcome);
        }

        self.progress.completed();

        if let Err(e) = self.persist(|store| store.set_status(outcome)) {
            tracing::error!(error = %e, "Persisting the terminal status failed");
        }

        let snapshot = self.status();
        tracing::info!(
            status = %snapshot.status,
            processed = snapshot.processed,
            total = snapshot.total,
            "Export run finished"
        );
        Ok(snapshot)
    }

    /// A completed run whose files failed to close did not actually
    /// complete; cancelled and failed runs keep their status.
    fn degrade_outcome(&self, outcome: ExportStatus) -> ExportStatus {
        if outcome != ExportStatus::Completed {
            return outcome;
        }
        let mut state = self.lock_state();
        state.status = ExportStatus::Error;
        ExportStatus::Error
    }

    /// Create the timestamp-named directory for this run.
    fn create_run_directory(&self) -> Result<PathBuf> {
        let base = &self.config.export.output_directory;
        fs::create_dir_all(base).map_err(|e| {
            CuratorError::Io(format!(
                "Failed to create output directory {}: {}",
                base.display(),
                e
            ))
        })?;

        let name = format!("export-{}", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let run_dir = base.join(name);

        // create_dir (not create_dir_all) so a name collision fails loudly
        fs::create_dir(&run_dir).map_err(|e| {
            CuratorError::Io(format!(
                "Failed to create run directory {}: {}",
                run_dir.display(),
                e
            ))
        })?;

        Ok(run_dir)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RunState> {
        self.state.lock().expect("run state lock poisoned")
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, Option<StatusStore>> {
        self.store.lock().expect("status store lock poisoned")
    }

    fn persist<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut StatusStore) -> Result<()>,
    {
        match self.lock_store().as_mut() {
            Some(store) => f(store),
            None => Ok(()),
        }
    }
}
