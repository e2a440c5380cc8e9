//! Data-quality warning report

pub mod collector;

pub use collector::WarningCollector;
