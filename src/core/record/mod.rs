//! Record construction

pub mod builder;

pub use builder::{repair_encoding, RecordBuilder};
