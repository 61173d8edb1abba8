//! Builder for declarative default seeds
//!
//! Handed to the `defaults` function of a [`SeedConfig`](crate::executor::SeedConfig):
//!
//! ```
//! use seedkit_core::builder::SeedBuilder;
//! use serde_json::json;
//!
//! let seeds = SeedBuilder::new();
//! let admin = seeds.user("admin", json!({"email": "admin@example.com", "password": "changeme1"}));
//! let post = seeds.collection("posts").create("first", json!({"title": "Hello"}));
//!
//! assert!(admin.options.use_auth_signup);
//! assert_eq!(post.collection, "posts");
//! ```

use serde_json::Value;

use crate::model::SeedEntity;

pub const DEFAULT_USER_COLLECTION: &str = "users";

/// Produces seed entities; holds no mutable state
#[derive(Debug, Clone)]
pub struct SeedBuilder {
    user_collection: String,
}

impl Default for SeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedBuilder {
    pub fn new() -> Self {
        Self {
            user_collection: DEFAULT_USER_COLLECTION.to_string(),
        }
    }

    pub fn with_user_collection(mut self, collection: impl Into<String>) -> Self {
        self.user_collection = collection.into();
        self
    }

    pub fn user_collection(&self) -> &str {
        &self.user_collection
    }

    /// A user account, created through the identity provider when one is configured
    pub fn user(&self, seed_id: impl Into<String>, data: Value) -> SeedEntity {
        SeedEntity::new(seed_id, self.user_collection.clone(), data).with_auth_signup(true)
    }

    /// Seeds targeting one collection
    pub fn collection(&self, name: impl Into<String>) -> CollectionSeeds {
        CollectionSeeds { name: name.into() }
    }
}

/// Entity factory bound to a collection
#[derive(Debug, Clone)]
pub struct CollectionSeeds {
    name: String,
}

impl CollectionSeeds {
    pub fn create(&self, seed_id: impl Into<String>, data: Value) -> SeedEntity {
        SeedEntity::new(seed_id, self.name.clone(), data)
    }
}
