use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless record as exchanged with storage
pub type Document = Map<String, Value>;

/// A document as returned by storage, carrying its storage-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub data: Document,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, data: Document) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// True when every field of `query` is present with an equal value
    pub fn matches(&self, query: &Document) -> bool {
        query
            .iter()
            .all(|(key, expected)| self.data.get(key) == Some(expected))
    }
}
