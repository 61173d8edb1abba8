//! Compensation of a failed run
//!
//! Every creation of the run is undone, most recent first. A failing
//! compensation is recorded and the loop moves on to the next entry.

use crate::errors::{Result, RollbackError, RollbackFailure, RolledBackSeed, SeedError};
use crate::ledger::SeedLedger;
use crate::model::SeededDocument;
use crate::ops::Storage;

/// A document created during the current run
#[derive(Debug, Clone)]
pub(crate) struct CreatedSeed {
    pub seed_id: String,
    pub collection: String,
    pub document_id: String,
    /// Whether its tracking record was written
    pub tracked: bool,
}

impl CreatedSeed {
    pub fn new(seeded: &SeededDocument) -> Self {
        Self {
            seed_id: seeded.seed_id.clone(),
            collection: seeded.collection.clone(),
            document_id: seeded.id.clone(),
            tracked: false,
        }
    }
}

/// Undo `created` (a stack, most recent last) and wrap `original_error`
pub(crate) fn roll_back(
    storage: &mut dyn Storage,
    mut created: Vec<CreatedSeed>,
    original_error: SeedError,
) -> RollbackError {
    let mut rolled_back_seeds = Vec::new();
    let mut rollback_failures = Vec::new();

    while let Some(entry) = created.pop() {
        match compensate(storage, &entry) {
            Ok(()) => rolled_back_seeds.push(RolledBackSeed {
                seed_id: entry.seed_id,
                collection: entry.collection,
                document_id: entry.document_id,
            }),
            Err(error) => {
                tracing::warn!(
                    seed_id = %entry.seed_id,
                    collection = %entry.collection,
                    document_id = %entry.document_id,
                    error = %error,
                    "rollback of seeded document failed"
                );
                rollback_failures.push(RollbackFailure {
                    seed_id: entry.seed_id,
                    collection: entry.collection,
                    document_id: entry.document_id,
                    error,
                });
            }
        }
    }

    RollbackError {
        original_error,
        rolled_back_seeds,
        rollback_failures,
    }
}

fn compensate(storage: &mut dyn Storage, entry: &CreatedSeed) -> Result<()> {
    let existed = storage.delete(&entry.collection, &entry.document_id)?;
    if entry.tracked {
        SeedLedger::delete(storage, &entry.seed_id)?;
    }
    if !existed {
        return Err(SeedError::storage(
            "delete",
            format!(
                "document '{}' was already missing from '{}'",
                entry.document_id, entry.collection
            ),
        ));
    }
    Ok(())
}
