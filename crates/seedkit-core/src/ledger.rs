//! Seed ledger
//!
//! Durable mapping from seed id to the document it produced, stored through
//! the `Storage` collaborator in a reserved collection. No caching, no
//! batching: every call goes straight to storage.

use serde_json::Value;

use crate::errors::{Result, SeedError};
use crate::model::{Document, SeedTrackingRecord};
use crate::ops::Storage;

/// Reserved collection holding tracking records
pub const TRACKING_COLLECTION: &str = "_seed_tracking";

/// Ledger operations over a storage collaborator
pub struct SeedLedger;

impl SeedLedger {
    pub fn find_by_seed_id(
        storage: &dyn Storage,
        seed_id: &str,
    ) -> Result<Option<SeedTrackingRecord>> {
        let rows = storage.find(TRACKING_COLLECTION, &seed_query(seed_id))?;
        rows.into_iter()
            .next()
            .map(SeedTrackingRecord::from_stored)
            .transpose()
    }

    /// Persist a new tracking record and return it with its storage id
    ///
    /// # Errors
    ///
    /// Returns `LedgerDuplicate` if the seed id is already tracked.
    pub fn create(
        storage: &mut dyn Storage,
        record: SeedTrackingRecord,
    ) -> Result<SeedTrackingRecord> {
        if Self::find_by_seed_id(storage, &record.seed_id)?.is_some() {
            return Err(SeedError::LedgerDuplicate {
                seed_id: record.seed_id,
            });
        }

        let stored = storage.create(TRACKING_COLLECTION, record.to_document()?)?;
        Ok(SeedTrackingRecord {
            id: stored.id,
            ..record
        })
    }

    /// Replace the checksum of a tracked seed, leaving every other field alone
    pub fn update_checksum(storage: &mut dyn Storage, seed_id: &str, checksum: &str) -> Result<()> {
        let record = Self::require(storage, seed_id)?;

        let mut patch = Document::new();
        patch.insert("checksum".to_string(), Value::String(checksum.to_string()));
        storage.update(TRACKING_COLLECTION, &record.id, patch)?;
        Ok(())
    }

    /// Remove the tracking record of a seed
    pub fn delete(storage: &mut dyn Storage, seed_id: &str) -> Result<()> {
        let record = Self::require(storage, seed_id)?;
        storage.delete(TRACKING_COLLECTION, &record.id)?;
        Ok(())
    }

    /// Every tracking record, in storage order
    pub fn list(storage: &dyn Storage) -> Result<Vec<SeedTrackingRecord>> {
        storage
            .find(TRACKING_COLLECTION, &Document::new())?
            .into_iter()
            .map(SeedTrackingRecord::from_stored)
            .collect()
    }

    fn require(storage: &dyn Storage, seed_id: &str) -> Result<SeedTrackingRecord> {
        Self::find_by_seed_id(storage, seed_id)?.ok_or_else(|| {
            SeedError::TrackingRecordNotFound {
                seed_id: seed_id.to_string(),
            }
        })
    }
}

fn seed_query(seed_id: &str) -> Document {
    let mut query = Document::new();
    query.insert("seed_id".to_string(), Value::String(seed_id.to_string()));
    query
}
