use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, SeedError};
use crate::model::{ConflictPolicy, Document};

/// Per-seed overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedEntityOptions {
    /// Overrides the run's global conflict policy for this seed
    pub on_conflict: Option<ConflictPolicy>,
    /// Route creation through the identity provider
    pub use_auth_signup: bool,
}

/// One instruction to create a record, keyed by a globally unique seed id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEntity {
    pub seed_id: String,
    pub collection: String,
    /// Must be a JSON object; checked when the entity is processed
    pub data: Value,
    #[serde(default)]
    pub options: SeedEntityOptions,
}

impl SeedEntity {
    pub fn new(seed_id: impl Into<String>, collection: impl Into<String>, data: Value) -> Self {
        Self {
            seed_id: seed_id.into(),
            collection: collection.into(),
            data,
            options: SeedEntityOptions::default(),
        }
    }

    /// Build an entity from any serializable payload
    pub fn from_serializable<T: Serialize>(
        seed_id: impl Into<String>,
        collection: impl Into<String>,
        data: &T,
    ) -> Result<Self> {
        Ok(Self::new(seed_id, collection, serde_json::to_value(data)?))
    }

    pub fn with_on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.options.on_conflict = Some(policy);
        self
    }

    pub fn with_auth_signup(mut self, use_auth_signup: bool) -> Self {
        self.options.use_auth_signup = use_auth_signup;
        self
    }

    /// Conflict policy for this seed given the run's global policy
    pub fn effective_policy(&self, global: ConflictPolicy) -> ConflictPolicy {
        self.options.on_conflict.unwrap_or(global)
    }

    /// The payload as a JSON object
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeedData` if the payload is not an object.
    pub fn data_object(&self) -> Result<&Document> {
        self.data
            .as_object()
            .ok_or_else(|| SeedError::InvalidSeedData {
                seed_id: self.seed_id.clone(),
                reason: format!("expected a JSON object, got {}", json_type(&self.data)),
            })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
