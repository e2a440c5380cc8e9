//! Record construction from raw catalog items
//!
//! Turns one raw item plus the field configuration into a flat [`Record`],
//! applying the encoding repair to every string value on the way.

use crate::config::ExportConfig;
use crate::domain::{RawItem, Record};
use serde_json::Value;

/// Builds flat records from raw items according to the field configuration.
pub struct RecordBuilder {
    field_names: Vec<String>,
    primary_key: String,
}

impl RecordBuilder {
    /// Create a builder for the configured fields.
    ///
    /// The configuration is validated before the builder is constructed, so
    /// a missing primary-key flag cannot occur here; an empty name is used
    /// as a defensive fallback.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            field_names: config.field_names(),
            primary_key: config.primary_key_field().unwrap_or_default().to_string(),
        }
    }

    /// Extract the primary-key value by describing the item restricted to
    /// just that field. Items without the field yield an empty key.
    pub fn primary_key_value(&self, item: &RawItem) -> String {
        item.describe(std::slice::from_ref(&self.primary_key))
            .into_iter()
            .next()
            .map(|(_, value)| value_to_string(&value))
            .unwrap_or_default()
    }

    /// Build the flat record by describing the item restricted to all
    /// configured field names, in configured order.
    ///
    /// JSON nulls are treated as absent fields; everything else becomes a
    /// string cell with the encoding repair applied.
    pub fn build(&self, item: &RawItem) -> Record {
        item.describe(&self.field_names)
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| (name, value_to_string(&value)))
            .collect()
    }
}

/// Render a JSON value as a CSV cell string.
///
/// Strings go through [`repair_encoding`]; other scalars use their JSON
/// display form; structured values serialize to compact JSON.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => repair_encoding(s),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Repair a string that was decoded with the wrong single-byte encoding.
///
/// The upstream catalog stores multi-byte characters in a legacy single-byte
/// codepage; the transport layer decodes those bytes as if each were its own
/// character, so a two-byte UTF-8 sequence arrives as two spurious
/// characters ("Ã©" for "é"). Re-encoding every character back to its
/// original byte and decoding the byte string as UTF-8 undoes the damage.
///
/// Best effort by design: values that contain characters above U+00FF or
/// whose bytes are not valid UTF-8 cannot be mis-decoded output and are
/// returned unchanged. Never fails.
pub fn repair_encoding(value: &str) -> String {
    let mut bytes = Vec::with_capacity(value.len());
    for ch in value.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return value.to_string();
        }
        bytes.push(code as u8);
    }

    match String::from_utf8(bytes) {
        Ok(repaired) => repaired,
        Err(_) => value.to_string(),
    }
}
