use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::errors::{Result, SeedError};
use crate::model::{Document, StoredDocument};
use crate::ops::Storage;

/// In-memory storage
///
/// HashMap-backed and single-threaded. Collections keep insertion order.
/// Failures can be injected per collection to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    collections: HashMap<String, Vec<StoredDocument>>,
    failing_creates: HashSet<String>,
    failing_updates: HashSet<String>,
    failing_deletes: HashSet<String>,
    blank_ids: HashSet<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// All documents of a collection, in insertion order
    pub fn documents(&self, collection: &str) -> &[StoredDocument] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, collection: &str) -> usize {
        self.documents(collection).len()
    }

    /// Make every `create` in `collection` fail
    pub fn fail_creates_in(&mut self, collection: impl Into<String>) {
        self.failing_creates.insert(collection.into());
    }

    /// Make every `update` in `collection` fail
    pub fn fail_updates_in(&mut self, collection: impl Into<String>) {
        self.failing_updates.insert(collection.into());
    }

    /// Make every `delete` in `collection` fail
    pub fn fail_deletes_in(&mut self, collection: impl Into<String>) {
        self.failing_deletes.insert(collection.into());
    }

    /// Make `create` in `collection` return a document with an empty id
    pub fn blank_ids_in(&mut self, collection: impl Into<String>) {
        self.blank_ids.insert(collection.into());
    }

    pub fn clear_failures(&mut self) {
        self.failing_creates.clear();
        self.failing_updates.clear();
        self.failing_deletes.clear();
        self.blank_ids.clear();
    }
}

impl Storage for MemoryStorage {
    fn find(&self, collection: &str, query: &Document) -> Result<Vec<StoredDocument>> {
        Ok(self
            .documents(collection)
            .iter()
            .filter(|doc| doc.matches(query))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
        Ok(self
            .documents(collection)
            .iter()
            .find(|doc| doc.id == id)
            .cloned())
    }

    fn create(&mut self, collection: &str, data: Document) -> Result<StoredDocument> {
        if self.failing_creates.contains(collection) {
            return Err(SeedError::storage(
                "create",
                format!("injected failure creating in '{}'", collection),
            ));
        }
        if self.blank_ids.contains(collection) {
            return Ok(StoredDocument::new("", data));
        }

        let doc = StoredDocument::new(Uuid::now_v7().to_string(), data);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    fn update(&mut self, collection: &str, id: &str, data: Document) -> Result<StoredDocument> {
        if self.failing_updates.contains(collection) {
            return Err(SeedError::storage(
                "update",
                format!("injected failure updating in '{}'", collection),
            ));
        }

        let doc = self
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| {
                SeedError::storage(
                    "update",
                    format!("document '{}' not found in '{}'", id, collection),
                )
            })?;

        doc.data.extend(data);
        Ok(doc.clone())
    }

    fn delete(&mut self, collection: &str, id: &str) -> Result<bool> {
        if self.failing_deletes.contains(collection) {
            return Err(SeedError::storage(
                "delete",
                format!("injected failure deleting from '{}'", collection),
            ));
        }

        let Some(docs) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() < before)
    }
}
