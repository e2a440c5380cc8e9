//! External system integrations for Curator.
//!
//! This module provides adapters for the systems the export core consumes:
//!
//! - [`catalog`] - the remote paginated catalog API (trait + HTTP client)
//! - [`listing`] - static file-listing scraper (outside the export loop)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The export core consumes
//! the catalog only through the [`catalog::PagedSource`] trait; transport
//! details never leak into the control loop.

pub mod catalog;
pub mod listing;
