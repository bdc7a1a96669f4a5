//! Panel response envelopes.
//!
//! Client API responses wrap every resource in an object envelope:
//! ```json
//! { "object": "server", "attributes": { ... } }
//! ```
//! and collections in a list envelope with pagination metadata:
//! ```json
//! { "object": "list", "data": [ { "object": "server", "attributes": { ... } } ],
//!   "meta": { "pagination": { "total": 1, "count": 1, ... } } }
//! ```

use serde::{Deserialize, Serialize};

/// A single resource envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<T> {
    /// Resource type name (e.g. "server", "file_object").
    #[serde(default)]
    pub object: String,
    /// Resource payload.
    pub attributes: T,
    /// Resource-level metadata (e.g. `secret_token` on new API keys).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// A list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<Resource<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

/// Metadata attached to list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMeta {
    /// Present on paginated endpoints.
    pub pagination: Option<Pagination>,
    /// Present on the backups listing.
    pub backup_count: Option<u32>,
}

/// Pagination block. Returned as data only; the client never walks pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
    #[serde(default)]
    pub links: serde_json::Value,
}

/// Signed URL returned by download/upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrl {
    pub url: String,
}

/// Bare `{ "data": ... }` wrapper used by a few account endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> ListResponse<T> {
    /// Number of resources on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pagination block, if the endpoint is paginated.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.meta.as_ref().and_then(|m| m.pagination.as_ref())
    }

    /// Borrow the payloads.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter().map(|r| &r.attributes)
    }

    /// Strip the envelopes.
    pub fn into_attributes(self) -> Vec<T> {
        self.data.into_iter().map(|r| r.attributes).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_list_with_pagination() {
        let json = r#"{
            "object": "list",
            "data": [
                {"object": "thing", "attributes": {"name": "a"}},
                {"object": "thing", "attributes": {"name": "b"}}
            ],
            "meta": {"pagination": {"total": 2, "count": 2, "per_page": 50, "current_page": 1, "total_pages": 1, "links": {}}}
        }"#;
        let list: ListResponse<Named> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.pagination().unwrap().per_page, 50);
        let names: Vec<String> = list.into_attributes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_list_without_meta() {
        let list: ListResponse<Named> =
            serde_json::from_str(r#"{"object":"list","data":[]}"#).unwrap();
        assert!(list.is_empty());
        assert!(list.pagination().is_none());
    }

    #[test]
    fn test_resource_meta() {
        let json = r#"{"object":"api_key","attributes":{"name":"k"},"meta":{"secret_token":"s3cr3t"}}"#;
        let res: Resource<Named> = serde_json::from_str(json).unwrap();
        assert_eq!(res.attributes.name, "k");
        assert_eq!(res.meta.unwrap()["secret_token"], "s3cr3t");
    }
}
