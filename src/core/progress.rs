//! Progress notification channel
//!
//! Fire-and-forget notifications emitted by the export controller. The
//! channel is an injected capability, not inherited behavior: the controller
//! holds a reference and calls it at the three lifecycle points. No delivery
//! guarantee, no backpressure.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer capability for export lifecycle notifications.
pub trait ProgressChannel: Send + Sync {
    /// The run has started: the output directory exists and collaborators
    /// are initialized.
    fn started(&self);

    /// One more item has been processed and written.
    fn progress(&self);

    /// The run has reached its terminal status and all files are closed.
    fn completed(&self);
}

/// Progress channel that logs each signal through `tracing`.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressChannel for LogProgress {
    fn started(&self) {
        tracing::info!("Export started");
    }

    fn progress(&self) {
        tracing::trace!("Item exported");
    }

    fn completed(&self) {
        tracing::info!("Export completed");
    }
}

/// Progress channel that discards every signal.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressChannel for NullProgress {
    fn started(&self) {}
    fn progress(&self) {}
    fn completed(&self) {}
}

/// Counting channel used by tests to observe signal delivery.
#[derive(Debug, Default)]
pub struct CountingProgress {
    started: AtomicUsize,
    progress: AtomicUsize,
    completed: AtomicUsize,
}

impl CountingProgress {
    /// Number of `started` signals received.
    pub fn started_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of `progress` signals received.
    pub fn progress_count(&self) -> usize {
        self.progress.load(Ordering::SeqCst)
    }

    /// Number of `completed` signals received.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl ProgressChannel for CountingProgress {
    fn started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn progress(&self) {
        self.progress.fetch_add(1, Ordering::SeqCst);
    }

    fn completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}
