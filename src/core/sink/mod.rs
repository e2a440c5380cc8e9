//! Tabular output sinks

pub mod csv;

pub use csv::CsvSink;
