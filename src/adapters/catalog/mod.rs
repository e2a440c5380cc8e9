//! Catalog adapter implementation
//!
//! This module provides the integration with the remote catalog API: the
//! paged source trait consumed by the export core, the HTTP implementation,
//! and the wire models.

pub mod http;
pub mod models;
pub mod source;

pub use http::HttpCatalogSource;
pub use source::PagedSource;
