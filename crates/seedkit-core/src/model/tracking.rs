use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SeedError};
use crate::model::{Document, StoredDocument};

/// Ledger row linking a seed id to the document it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTrackingRecord {
    /// Storage id of the tracking row itself
    pub id: String,
    pub seed_id: String,
    pub collection: String,
    pub document_id: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted fields; the id is assigned by storage
#[derive(Serialize, Deserialize)]
struct TrackingFields {
    seed_id: String,
    collection: String,
    document_id: String,
    checksum: String,
    created_at: DateTime<Utc>,
}

impl SeedTrackingRecord {
    /// A record not yet persisted (empty id)
    pub fn new(
        seed_id: impl Into<String>,
        collection: impl Into<String>,
        document_id: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            seed_id: seed_id.into(),
            collection: collection.into(),
            document_id: document_id.into(),
            checksum: checksum.into(),
            created_at: Utc::now(),
        }
    }

    /// Fields to hand to storage
    pub fn to_document(&self) -> Result<Document> {
        let fields = TrackingFields {
            seed_id: self.seed_id.clone(),
            collection: self.collection.clone(),
            document_id: self.document_id.clone(),
            checksum: self.checksum.clone(),
            created_at: self.created_at,
        };
        match serde_json::to_value(fields)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(SeedError::Serialization {
                message: format!("tracking record serialized to non-object: {}", other),
            }),
        }
    }

    pub fn from_stored(stored: StoredDocument) -> Result<Self> {
        let fields: TrackingFields =
            serde_json::from_value(serde_json::Value::Object(stored.data))?;
        Ok(Self {
            id: stored.id,
            seed_id: fields.seed_id,
            collection: fields.collection,
            document_id: fields.document_id,
            checksum: fields.checksum,
            created_at: fields.created_at,
        })
    }
}
