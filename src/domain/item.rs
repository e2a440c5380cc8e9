//! Raw catalog item
//!
//! A `RawItem` is one record of the remote catalog, opaque to the export
//! core except for its description-by-field-name capability.

use serde_json::Value;

/// One raw item returned by the paginated catalog source.
///
/// The item wraps the JSON object exactly as the remote API returned it.
/// The only operation the export core performs on it is [`RawItem::describe`],
/// which restricts the item to a given set of field names.
///
/// # Examples
///
/// ```
/// use curator::domain::RawItem;
/// use serde_json::json;
///
/// let item = RawItem::new(json!({"idno": "1999.4.12", "title": "Teapot"}));
/// let described = item.describe(&["idno".to_string()]);
/// assert_eq!(described.len(), 1);
/// assert_eq!(described[0].0, "idno");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem(Value);

impl RawItem {
    /// Wrap a raw JSON value as a catalog item.
    pub fn new(value: Value) -> Self {
        RawItem(value)
    }

    /// Describe the item restricted to the given field names.
    ///
    /// Returns `(name, value)` pairs in the order the names were requested.
    /// Names absent on the item are omitted from the result.
    pub fn describe(&self, field_names: &[String]) -> Vec<(String, Value)> {
        let Some(object) = self.0.as_object() else {
            return Vec::new();
        };

        field_names
            .iter()
            .filter_map(|name| object.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }

    /// Names of all fields present on the raw item.
    ///
    /// Used by the warning collector to detect fields the export
    /// configuration does not cover.
    pub fn field_names(&self) -> Vec<String> {
        match self.0.as_object() {
            Some(object) => object.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Whether the item carries the given field.
    pub fn has_field(&self, name: &str) -> bool {
        self.0.as_object().is_some_and(|o| o.contains_key(name))
    }

    /// Access the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawItem {
    fn from(value: Value) -> Self {
        RawItem::new(value)
    }
}
