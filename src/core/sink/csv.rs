//! CSV record sink
//!
//! Appends flat records as rows of `objects.csv`. The sink owns the file
//! lifecycle: the header row is written on creation, rows are appended in
//! call order, and `end` consumes the sink so no write can follow it.

use crate::domain::{Record, Result};
use std::fs::File;
use std::path::Path;

/// Record sink over a CSV file.
pub struct CsvSink {
    writer: csv::Writer<File>,
    columns: Vec<String>,
    rows_written: u64,
}

impl CsvSink {
    /// Create the output file and write the header row.
    ///
    /// Columns follow the configured field order and define the shape of
    /// every subsequent row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot
    /// be written.
    pub fn create(path: &Path, columns: Vec<String>) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&columns)?;
        writer.flush().map_err(crate::domain::CuratorError::from)?;

        Ok(Self {
            writer,
            columns,
            rows_written: 0,
        })
    }

    /// Append one record as a row.
    ///
    /// Cells follow the column order; fields absent from the record become
    /// empty cells. No dedup, no validation beyond shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        let row: Vec<&str> = self
            .columns
            .iter()
            .map(|column| record.get(column).unwrap_or(""))
            .collect();
        self.writer.write_record(&row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far (excluding the header).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and close the file.
    ///
    /// Consumes the sink, so no write can follow.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn end(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(crate::domain::CuratorError::from)
    }
}
