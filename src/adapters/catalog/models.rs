//! Catalog API wire models
//!
//! Response shapes for the paginated catalog REST API. These types stay in
//! the adapter layer; the export core only ever sees [`crate::domain::RawItem`].

use serde::Deserialize;
use serde_json::Value;

/// Response of the collection count endpoint
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    /// Total number of objects in the collection
    pub count: u64,
}

/// Response of the paged object-listing endpoint
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    /// Objects on this page, in catalog order
    #[serde(default)]
    pub objects: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_response_deserialization() {
        let response: CountResponse = serde_json::from_str(r#"{"count": 1234}"#).unwrap();
        assert_eq!(response.count, 1234);
    }

    #[test]
    fn test_page_response_deserialization() {
        let response: PageResponse =
            serde_json::from_str(r#"{"objects": [{"idno": "A"}, {"idno": "B"}]}"#).unwrap();
        assert_eq!(response.objects.len(), 2);
    }

    #[test]
    fn test_page_response_missing_objects_defaults_empty() {
        let response: PageResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.objects.is_empty());
    }
}
