use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::Result;
use crate::model::{Document, StoredDocument};

/// Document storage the seeding engine writes through
///
/// The engine knows nothing about the underlying technology. Collections are
/// assumed to exist; ids are assigned by the implementation.
pub trait Storage {
    /// Documents whose top-level fields equal every field of `query`
    fn find(&self, collection: &str, query: &Document) -> Result<Vec<StoredDocument>>;

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>>;

    /// Insert a document and return it with its assigned id
    fn create(&mut self, collection: &str, data: Document) -> Result<StoredDocument>;

    /// Shallow-merge `data` into an existing document
    ///
    /// # Errors
    ///
    /// Fails if the document does not exist.
    fn update(&mut self, collection: &str, id: &str, data: Document) -> Result<StoredDocument>;

    /// Remove a document; `false` if it did not exist
    fn delete(&mut self, collection: &str, id: &str) -> Result<bool>;
}

/// Shared handle, for collaborators (such as an identity provider) that
/// write to the same store as the engine
impl<S: Storage> Storage for Rc<RefCell<S>> {
    fn find(&self, collection: &str, query: &Document) -> Result<Vec<StoredDocument>> {
        self.borrow().find(collection, query)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>> {
        self.borrow().find_by_id(collection, id)
    }

    fn create(&mut self, collection: &str, data: Document) -> Result<StoredDocument> {
        self.borrow_mut().create(collection, data)
    }

    fn update(&mut self, collection: &str, id: &str, data: Document) -> Result<StoredDocument> {
        self.borrow_mut().update(collection, id, data)
    }

    fn delete(&mut self, collection: &str, id: &str) -> Result<bool> {
        self.borrow_mut().delete(collection, id)
    }
}
