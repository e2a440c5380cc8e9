//! Domain models and types for Curator.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Raw items** ([`RawItem`]) — opaque catalog records with a
//!   description-by-field-name capability
//! - **Flat records** ([`Record`]) — ordered field-to-value mappings ready
//!   for the CSV sink
//! - **Error types** ([`CuratorError`], [`CatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CuratorError>`]:
//!
//! ```rust
//! use curator::domain::{CuratorError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = curator::config::load_config("curator.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod item;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CatalogError, CuratorError};
pub use item::RawItem;
pub use record::Record;
pub use result::Result;
