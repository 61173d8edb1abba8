use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Map, Value};
use seedkit_core::ops::{IdentityProvider, SignUpError, SignUpRequest, SignedUpUser};
use seedkit_core::{Document, MemoryStorage, Storage};

/// Shared in-memory store, usable by the engine and an identity provider at once
#[allow(dead_code)]
pub fn shared_store() -> Rc<RefCell<MemoryStorage>> {
    Rc::new(RefCell::new(MemoryStorage::new()))
}

/// Build a document from a `json!` object literal
#[allow(dead_code)]
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Identity provider writing accounts into the shared store
///
/// Accounts are created with the default role, the way a real provider
/// would, so callers can observe role patching.
#[allow(dead_code)]
pub struct StoreIdentityProvider {
    storage: Rc<RefCell<MemoryStorage>>,
    collection: String,
    pub requests: Vec<SignUpRequest>,
    pub fail_with: Option<String>,
    pub return_none: bool,
}

#[allow(dead_code)]
impl StoreIdentityProvider {
    pub fn new(storage: Rc<RefCell<MemoryStorage>>) -> Self {
        Self {
            storage,
            collection: "users".to_string(),
            requests: Vec::new(),
            fail_with: None,
            return_none: false,
        }
    }
}

impl IdentityProvider for StoreIdentityProvider {
    fn sign_up_email(
        &mut self,
        request: &SignUpRequest,
    ) -> Result<Option<SignedUpUser>, SignUpError> {
        self.requests.push(request.clone());

        if let Some(message) = &self.fail_with {
            return Err(SignUpError::Other {
                message: message.clone(),
            });
        }
        if self.return_none {
            return Ok(None);
        }

        let query = doc(json!({ "email": request.email }));
        let existing = self
            .storage
            .find(&self.collection, &query)
            .map_err(|e| SignUpError::Other {
                message: e.to_string(),
            })?;
        if !existing.is_empty() {
            return Err(SignUpError::AlreadyExists {
                message: format!("user with email {} exists", request.email),
            });
        }

        let account = doc(json!({
            "name": request.name,
            "email": request.email,
            "role": "user",
        }));
        let created = self
            .storage
            .create(&self.collection, account)
            .map_err(|e| SignUpError::Other {
                message: e.to_string(),
            })?;
        Ok(Some(SignedUpUser { id: created.id }))
    }
}
