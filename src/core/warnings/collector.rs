//! Data-quality warning collector
//!
//! Inspects each raw item / record pair against the configured warning
//! policies and appends findings to the secondary `warnings.csv` report.
//!
//! Three policies, each behind its own configuration flag:
//!
//! - **missing fields**: a required field absent from the record is reported
//!   immediately, one row per item and field;
//! - **unused fields**: a field present on the raw item but not covered by
//!   the export configuration is reported the first time it is seen;
//! - **singleton fields**: fields whose observed values collapse to a very
//!   small distinct set across the run are reported when the collector is
//!   closed, since the verdict needs the whole run.

use crate::config::ExportConfig;
use crate::domain::{RawItem, Record, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::path::Path;

/// Distinct-value ceiling for the singleton policy. Tracking stops for a
/// field once it exceeds this many values.
const SINGLETON_DISTINCT_CAP: usize = 3;

/// Minimum number of rows before the singleton policy can fire.
const SINGLETON_MIN_ROWS: u64 = 10;

/// Collector for data-quality findings, writing `warnings.csv`.
pub struct WarningCollector {
    writer: csv::Writer<File>,
    singleton_fields: bool,
    missing_fields: bool,
    unused_fields: bool,
    required: Vec<String>,
    configured: HashSet<String>,
    /// Distinct values per tracked field; `None` once the cap is exceeded.
    distinct: BTreeMap<String, Option<BTreeSet<String>>>,
    reported_unused: HashSet<String>,
    rows_seen: u64,
}

impl WarningCollector {
    /// Create the report file and write its header row.
    ///
    /// Fields flagged `enumerated` are expected to collapse to few values
    /// and are excluded from singleton tracking.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path, config: &ExportConfig) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["warning", "field", "object_id", "detail"])?;
        writer.flush().map_err(crate::domain::CuratorError::from)?;

        let enumerated: HashSet<String> = config.enumerated_fields().into_iter().collect();
        let distinct = config
            .field_names()
            .into_iter()
            .filter(|name| !enumerated.contains(name))
            .map(|name| (name, Some(BTreeSet::new())))
            .collect();

        Ok(Self {
            writer,
            singleton_fields: config.warnings.singleton_fields,
            missing_fields: config.warnings.missing_fields,
            unused_fields: config.warnings.unused_fields,
            required: config.required_fields(),
            configured: config.field_names().into_iter().collect(),
            distinct,
            reported_unused: HashSet::new(),
            rows_seen: 0,
        })
    }

    /// Inspect one item and append any immediate findings.
    ///
    /// # Errors
    ///
    /// Returns an error if a finding cannot be written.
    pub fn append_findings(
        &mut self,
        primary_key: &str,
        item: &RawItem,
        record: &Record,
    ) -> Result<()> {
        self.rows_seen += 1;

        if self.missing_fields {
            for field in &self.required {
                if !record.contains(field) {
                    self.writer.write_record([
                        "missing_field",
                        field.as_str(),
                        primary_key,
                        "required field absent from record",
                    ])?;
                }
            }
        }

        if self.unused_fields {
            for field in item.field_names() {
                if !self.configured.contains(&field) && self.reported_unused.insert(field.clone())
                {
                    self.writer.write_record([
                        "unused_field",
                        field.as_str(),
                        primary_key,
                        "field present on item but not exported",
                    ])?;
                }
            }
        }

        if self.singleton_fields {
            for (field, value) in record.iter() {
                if let Some(entry) = self.distinct.get_mut(field) {
                    if let Some(values) = entry {
                        values.insert(value.to_string());
                        if values.len() > SINGLETON_DISTINCT_CAP {
                            *entry = None;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Emit deferred singleton findings, flush, and close the report.
    ///
    /// Consumes the collector, so no finding can follow.
    ///
    /// # Errors
    ///
    /// Returns an error if the deferred findings or the final flush fail.
    pub fn end(mut self) -> Result<()> {
        if self.singleton_fields && self.rows_seen >= SINGLETON_MIN_ROWS {
            for (field, entry) in &self.distinct {
                if let Some(values) = entry {
                    if values.is_empty() {
                        continue;
                    }
                    let listed: Vec<&str> = values.iter().map(String::as_str).collect();
                    let detail = format!(
                        "only {} distinct value(s) across {} rows: {}",
                        values.len(),
                        self.rows_seen,
                        listed.join(", ")
                    );
                    self.writer
                        .write_record(["singleton_field", field.as_str(), "", detail.as_str()])?;
                }
            }
        }

        self.writer
            .flush()
            .map_err(crate::domain::CuratorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldSpec, WarningsConfig};
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(warnings: WarningsConfig) -> ExportConfig {
        ExportConfig {
            output_directory: PathBuf::from("./exports"),
            fields: vec![
                FieldSpec {
                    name: "idno".to_string(),
                    primary_key: true,
                    required: true,
                    enumerated: false,
                },
                FieldSpec {
                    name: "title".to_string(),
                    primary_key: false,
                    required: true,
                    enumerated: false,
                },
                FieldSpec {
                    name: "object_type".to_string(),
                    primary_key: false,
                    required: false,
                    enumerated: true,
                },
            ],
            warnings,
            debug_limit: None,
            max_consecutive_fetch_failures: 10,
        }
    }

    fn record_for(idno: &str, title: Option<&str>) -> Record {
        let mut record = Record::new();
        record.push("idno", idno);
        if let Some(title) = title {
            record.push("title", title);
        }
        record
    }

    fn read_report(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_missing_required_field_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector = WarningCollector::create(
            &path,
            &config(WarningsConfig {
                missing_fields: true,
                ..Default::default()
            }),
        )
        .unwrap();

        let item = RawItem::new(json!({"idno": "A-1"}));
        collector
            .append_findings("A-1", &item, &record_for("A-1", None))
            .unwrap();
        collector.end().unwrap();

        let lines = read_report(&path);
        assert_eq!(lines[0], "warning,field,object_id,detail");
        assert!(lines[1].starts_with("missing_field,title,A-1"));
    }

    #[test]
    fn test_missing_fields_disabled_by_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector =
            WarningCollector::create(&path, &config(WarningsConfig::default())).unwrap();

        let item = RawItem::new(json!({"idno": "A-1"}));
        collector
            .append_findings("A-1", &item, &record_for("A-1", None))
            .unwrap();
        collector.end().unwrap();

        assert_eq!(read_report(&path).len(), 1); // header only
    }

    #[test]
    fn test_unused_field_reported_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector = WarningCollector::create(
            &path,
            &config(WarningsConfig {
                unused_fields: true,
                ..Default::default()
            }),
        )
        .unwrap();

        let item = RawItem::new(json!({"idno": "A-1", "title": "T", "internal_note": "x"}));
        collector
            .append_findings("A-1", &item, &record_for("A-1", Some("T")))
            .unwrap();
        collector
            .append_findings("A-2", &item, &record_for("A-2", Some("T")))
            .unwrap();
        collector.end().unwrap();

        let lines = read_report(&path);
        let unused: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("unused_field"))
            .collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].contains("internal_note"));
    }

    #[test]
    fn test_singleton_field_reported_at_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector = WarningCollector::create(
            &path,
            &config(WarningsConfig {
                singleton_fields: true,
                ..Default::default()
            }),
        )
        .unwrap();

        // Twelve rows, every title identical, idnos all distinct
        for i in 0..12 {
            let idno = format!("A-{i}");
            let item = RawItem::new(json!({"idno": idno, "title": "Untitled"}));
            collector
                .append_findings(&idno, &item, &record_for(&idno, Some("Untitled")))
                .unwrap();
        }
        collector.end().unwrap();

        let lines = read_report(&path);
        let singleton: Vec<&String> = lines
            .iter()
            .filter(|l| l.starts_with("singleton_field"))
            .collect();
        assert_eq!(singleton.len(), 1);
        assert!(singleton[0].contains("title"));
        assert!(singleton[0].contains("Untitled"));
    }

    #[test]
    fn test_singleton_skipped_below_row_minimum() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector = WarningCollector::create(
            &path,
            &config(WarningsConfig {
                singleton_fields: true,
                ..Default::default()
            }),
        )
        .unwrap();

        for i in 0..3 {
            let idno = format!("A-{i}");
            let item = RawItem::new(json!({"idno": idno, "title": "Untitled"}));
            collector
                .append_findings(&idno, &item, &record_for(&idno, Some("Untitled")))
                .unwrap();
        }
        collector.end().unwrap();

        assert_eq!(read_report(&path).len(), 1); // header only
    }

    #[test]
    fn test_enumerated_fields_not_tracked_as_singleton() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        let mut collector = WarningCollector::create(
            &path,
            &config(WarningsConfig {
                singleton_fields: true,
                ..Default::default()
            }),
        )
        .unwrap();

        for i in 0..12 {
            let idno = format!("A-{i}");
            let item = RawItem::new(json!({"idno": idno, "object_type": "teapot"}));
            let mut record = record_for(&idno, Some(format!("Title {i}").as_str()));
            record.push("object_type", "teapot");
            collector.append_findings(&idno, &item, &record).unwrap();
        }
        collector.end().unwrap();

        let lines = read_report(&path);
        assert!(!lines.iter().any(|l| l.contains("object_type")));
    }
}
