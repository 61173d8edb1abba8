use seedkit_core_types::RunId;

use crate::errors::Result;
use crate::executor::SeedRun;
use crate::ledger::SeedLedger;
use crate::model::{SeedAction, SeedEntity, SeededDocument, SeedingOptions};

/// Capabilities handed to a procedural seed function
///
/// Lives for one run. Lookups see everything seeded earlier in the same run
/// before falling back to the ledger.
pub struct SeedContext<'r, 'a> {
    run: &'r mut SeedRun<'a>,
}

impl<'r, 'a> SeedContext<'r, 'a> {
    pub(crate) fn new(run: &'r mut SeedRun<'a>) -> Self {
        Self { run }
    }

    /// Look up a seeded document by seed id
    ///
    /// Documents found only through the ledger (seeded by an earlier run) are
    /// reported with action `Skipped`. Returns `None` when neither the run
    /// nor the ledger knows the seed id, or when the tracked document no
    /// longer exists.
    pub fn get_seeded(&self, seed_id: &str) -> Result<Option<SeededDocument>> {
        if let Some(seeded) = self.run.seeded.get(seed_id) {
            return Ok(Some(seeded.clone()));
        }

        let Some(record) = SeedLedger::find_by_seed_id(&*self.run.storage, seed_id)? else {
            return Ok(None);
        };
        let stored = self
            .run
            .storage
            .find_by_id(&record.collection, &record.document_id)?;

        Ok(stored.map(|doc| SeededDocument {
            id: doc.id,
            seed_id: record.seed_id,
            collection: record.collection,
            data: doc.data,
            action: SeedAction::Skipped,
        }))
    }

    /// Process one entity exactly as a default would be
    ///
    /// Creations become eligible for rollback if the run later fails.
    pub fn seed(&mut self, entity: SeedEntity) -> Result<SeededDocument> {
        self.run.process_seed_entity(entity)
    }

    /// Progress message; dropped when the run is quiet
    pub fn log(&self, message: impl AsRef<str>) {
        self.run.log(message.as_ref());
    }

    pub fn run_id(&self) -> &RunId {
        &self.run.run_id
    }

    pub fn options(&self) -> &SeedingOptions {
        &self.run.options
    }
}
