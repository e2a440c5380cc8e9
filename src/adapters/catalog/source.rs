//! Paged catalog source trait
//!
//! This module defines the `PagedSource` trait that abstracts the remote,
//! paginated catalog behind the three operations the export control loop
//! needs. The trait allows the core to be exercised against in-memory
//! sources in tests while production uses the HTTP implementation.

use crate::domain::{CatalogError, RawItem};
use async_trait::async_trait;

/// Trait for paginated catalog sources
///
/// The export control loop consumes the catalog exclusively through this
/// interface. The error kinds returned carry the recovery policy:
/// [`count`](PagedSource::count) and [`has_more`](PagedSource::has_more)
/// fail with [`CatalogError::Collection`] (fatal for the run), while
/// [`next`](PagedSource::next) fails with [`CatalogError::Item`]
/// (recoverable, the loop skips the item).
#[async_trait]
pub trait PagedSource: Send {
    /// Total number of items in the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Collection`] if the count query fails;
    /// this aborts the whole run.
    async fn count(&mut self) -> Result<u64, CatalogError>;

    /// Whether the cursor has items left to fetch.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Collection`] if the check fails; this
    /// aborts the whole run.
    async fn has_more(&mut self) -> Result<bool, CatalogError>;

    /// Fetch the next item and advance the cursor.
    ///
    /// Returns `Ok(None)` as the end-of-collection sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Item`] if the fetch fails; the loop logs
    /// the error, skips the item, and continues.
    async fn next(&mut self) -> Result<Option<RawItem>, CatalogError>;
}
