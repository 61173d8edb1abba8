//! Conflict resolution for already-tracked seeds
//!
//! Pure decision logic: given the existing tracking record (if any), the
//! checksum of the incoming payload and the effective policy, decide what the
//! executor does. No I/O happens here.

use crate::errors::{Result, SeedError};
use crate::model::{ConflictPolicy, SeedTrackingRecord};

/// What the executor should do with a seed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Nothing tracked yet: create the document
    Create,
    /// Leave the tracked document as it is
    Skip(&'a SeedTrackingRecord),
    /// Rewrite the tracked document and refresh its checksum
    Update(&'a SeedTrackingRecord),
}

/// Apply the conflict policy
///
/// # Errors
///
/// Returns `Conflict` (naming the seed id and collection) when the policy is
/// `Error` and the seed is already tracked.
pub fn resolve_conflict<'a>(
    existing: Option<&'a SeedTrackingRecord>,
    incoming_checksum: &str,
    policy: ConflictPolicy,
) -> Result<Resolution<'a>> {
    let Some(record) = existing else {
        return Ok(Resolution::Create);
    };

    match policy {
        ConflictPolicy::Skip => Ok(Resolution::Skip(record)),
        ConflictPolicy::Update if record.checksum == incoming_checksum => {
            Ok(Resolution::Skip(record))
        }
        ConflictPolicy::Update => Ok(Resolution::Update(record)),
        ConflictPolicy::Error => Err(SeedError::Conflict {
            seed_id: record.seed_id.clone(),
            collection: record.collection.clone(),
        }),
    }
}
