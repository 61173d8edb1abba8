//! Seed executor
//!
//! Runs a seeding configuration against a storage collaborator:
//! 1. Evaluates `defaults` and processes every entity in order
//! 2. Invokes the procedural `seed` function with a [`SeedContext`]
//! 3. On any failure, compensates every document created in the run
//!    (most recent first) and returns a rollback error
//!
//! Processing is strictly sequential: later entities may depend on the
//! documents and ledger entries produced by earlier ones.

mod context;
mod rollback;
mod signup;

pub use context::SeedContext;
pub use signup::{DEFAULT_ROLE, MIN_PASSWORD_LENGTH};

use std::collections::HashMap;
use std::time::Instant;

use seedkit_core_types::RunId;

use crate::builder::SeedBuilder;
use crate::checksum::checksum;
use crate::conflict::{resolve_conflict, Resolution};
use crate::errors::{ExError, Result, SeedError};
use crate::ledger::SeedLedger;
use crate::model::{
    Document, SeedAction, SeedEntity, SeedTrackingRecord, SeededDocument, SeedingOptions,
    SeedingResult,
};
use crate::ops::{IdentityProvider, SeedLogger, Storage, TracingLogger};
use crate::{log_op_end, log_op_error, log_op_start};
use rollback::CreatedSeed;

/// Produces the ordered list of declarative seeds
pub type DefaultsFn<'c> = Box<dyn FnOnce(&SeedBuilder) -> Vec<SeedEntity> + 'c>;

/// Procedural seeding function, run after all defaults
pub type SeedFn<'c> = Box<dyn FnOnce(&mut SeedContext<'_, '_>) -> Result<()> + 'c>;

/// What to seed
pub struct SeedConfig<'c> {
    pub defaults: Option<DefaultsFn<'c>>,
    pub seed: Option<SeedFn<'c>>,
    pub options: SeedingOptions,
    pub builder: SeedBuilder,
}

impl Default for SeedConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> SeedConfig<'c> {
    pub fn new() -> Self {
        Self {
            defaults: None,
            seed: None,
            options: SeedingOptions::default(),
            builder: SeedBuilder::new(),
        }
    }

    pub fn with_defaults<F>(mut self, defaults: F) -> Self
    where
        F: FnOnce(&SeedBuilder) -> Vec<SeedEntity> + 'c,
    {
        self.defaults = Some(Box::new(defaults));
        self
    }

    /// Use a fixed list of entities as defaults
    pub fn with_entities(self, entities: Vec<SeedEntity>) -> Self {
        self.with_defaults(move |_| entities)
    }

    pub fn with_seed<F>(mut self, seed: F) -> Self
    where
        F: FnOnce(&mut SeedContext<'_, '_>) -> Result<()> + 'c,
    {
        self.seed = Some(Box::new(seed));
        self
    }

    pub fn with_options(mut self, options: SeedingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_builder(mut self, builder: SeedBuilder) -> Self {
        self.builder = builder;
        self
    }
}

static TRACING_LOGGER: TracingLogger = TracingLogger;

/// Wires the collaborators of a seeding run
pub struct SeedExecutor<'a> {
    storage: &'a mut dyn Storage,
    identity: Option<&'a mut dyn IdentityProvider>,
    logger: &'a dyn SeedLogger,
}

impl<'a> SeedExecutor<'a> {
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        Self {
            storage,
            identity: None,
            logger: &TRACING_LOGGER,
        }
    }

    /// Route `use_auth_signup` seeds through this provider
    pub fn with_identity_provider(mut self, provider: &'a mut dyn IdentityProvider) -> Self {
        self.identity = Some(provider);
        self
    }

    pub fn with_logger(mut self, logger: &'a dyn SeedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Run the configuration
    ///
    /// `options`, when given, replaces `config.options`.
    ///
    /// # Errors
    ///
    /// Returns the failure unchanged when nothing was created yet, otherwise
    /// `SeedError::Rollback` carrying the original error and the outcome of
    /// compensating every creation of this run.
    pub fn run(
        self,
        config: SeedConfig<'_>,
        options: Option<SeedingOptions>,
    ) -> Result<SeedingResult> {
        let SeedConfig {
            defaults,
            seed,
            options: config_options,
            builder,
        } = config;
        let options = options.unwrap_or(config_options);

        let start = Instant::now();
        let mut run = SeedRun::new(self.storage, self.identity, self.logger, options);
        log_op_start!("seed_run", run_id = %run.run_id);

        match run.execute(defaults, seed, &builder) {
            Ok(()) => {
                let result = SeedingResult::from_seeds(std::mem::take(&mut run.processed));
                run.log(&format!(
                    "Seeding complete: {} created, {} updated, {} skipped",
                    result.created, result.updated, result.skipped
                ));
                log_op_end!(
                    "seed_run",
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = %run.run_id,
                    created = result.created,
                    updated = result.updated,
                    skipped = result.skipped
                );
                Ok(result)
            }
            Err(err) => {
                let err = run.fail(err);
                log_op_error!(
                    "seed_run",
                    ExError::from(err.clone()).with_run_id(run.run_id.clone()),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }
}

/// Run `config` against `storage` with the default tracing logger and no
/// identity provider
pub fn run_seeding(
    config: SeedConfig<'_>,
    storage: &mut dyn Storage,
    options: Option<SeedingOptions>,
) -> Result<SeedingResult> {
    SeedExecutor::new(storage).run(config, options)
}

/// State of one seeding run
pub(crate) struct SeedRun<'a> {
    storage: &'a mut dyn Storage,
    identity: Option<&'a mut dyn IdentityProvider>,
    logger: &'a dyn SeedLogger,
    options: SeedingOptions,
    run_id: RunId,
    /// seed_id -> outcome, for everything processed in this run
    seeded: HashMap<String, SeededDocument>,
    /// Creations of this run, most recent last
    created: Vec<CreatedSeed>,
    processed: Vec<SeededDocument>,
}

impl<'a> SeedRun<'a> {
    fn new(
        storage: &'a mut dyn Storage,
        identity: Option<&'a mut dyn IdentityProvider>,
        logger: &'a dyn SeedLogger,
        options: SeedingOptions,
    ) -> Self {
        Self {
            storage,
            identity,
            logger,
            options,
            run_id: RunId::new(),
            seeded: HashMap::new(),
            created: Vec::new(),
            processed: Vec::new(),
        }
    }

    fn execute(
        &mut self,
        defaults: Option<DefaultsFn<'_>>,
        seed: Option<SeedFn<'_>>,
        builder: &SeedBuilder,
    ) -> Result<()> {
        if let Some(defaults) = defaults {
            let entities = defaults(builder);
            self.log(&format!("Seeding {} default entities", entities.len()));
            for entity in entities {
                self.process_seed_entity(entity)?;
            }
        }

        if let Some(seed) = seed {
            self.log("Running seed function");
            let mut ctx = SeedContext::new(self);
            seed(&mut ctx)?;
        }

        Ok(())
    }

    /// Compensate this run's creations, if any, and build the error to return
    fn fail(&mut self, err: SeedError) -> SeedError {
        if self.created.is_empty() {
            return err;
        }

        self.log(&format!(
            "Seeding failed, rolling back {} created seed(s)",
            self.created.len()
        ));
        let created = std::mem::take(&mut self.created);
        rollback::roll_back(&mut *self.storage, created, err).into()
    }

    /// Forward to the logger unless the run is quiet
    pub(crate) fn log(&self, message: &str) {
        if !self.options.quiet {
            self.logger.info(message);
        }
    }

    pub(crate) fn process_seed_entity(&mut self, entity: SeedEntity) -> Result<SeededDocument> {
        let policy = entity.effective_policy(self.options.on_conflict);
        let data = entity.data_object()?.clone();
        let checksum = checksum(&data);
        let existing = SeedLedger::find_by_seed_id(&*self.storage, &entity.seed_id)?;

        let seeded = match resolve_conflict(existing.as_ref(), &checksum, policy)? {
            Resolution::Create => self.create(&entity, data, checksum)?,
            Resolution::Skip(record) => self.skip(&entity, record, data)?,
            Resolution::Update(record) => self.update(&entity, record, data, &checksum)?,
        };

        tracing::debug!(
            run_id = %self.run_id,
            seed_id = %seeded.seed_id,
            collection = %seeded.collection,
            action = seeded.action.as_str(),
            "seed processed"
        );
        self.seeded.insert(seeded.seed_id.clone(), seeded.clone());
        self.processed.push(seeded.clone());
        Ok(seeded)
    }

    fn create(
        &mut self,
        entity: &SeedEntity,
        data: Document,
        checksum: String,
    ) -> Result<SeededDocument> {
        let via_signup = entity.options.use_auth_signup && self.identity.is_some();
        if entity.options.use_auth_signup && !via_signup {
            tracing::warn!(
                run_id = %self.run_id,
                seed_id = %entity.seed_id,
                collection = %entity.collection,
                "auth-signup seed created without an identity provider; fields are stored as given"
            );
        }

        let seeded = match self.identity.as_deref_mut() {
            Some(provider) if via_signup => signup::create_via_signup(provider, entity, data)?,
            _ => {
                let stored = self.storage.create(&entity.collection, data)?;
                if stored.id.is_empty() {
                    return Err(SeedError::MissingDocumentId {
                        seed_id: entity.seed_id.clone(),
                        collection: entity.collection.clone(),
                    });
                }
                SeededDocument {
                    id: stored.id,
                    seed_id: entity.seed_id.clone(),
                    collection: entity.collection.clone(),
                    data: stored.data,
                    action: SeedAction::Created,
                }
            }
        };

        // Rollback-eligible before the role patch and the ledger write, so a
        // failure in either still gets the document removed
        self.created.push(CreatedSeed::new(&seeded));
        if via_signup {
            signup::apply_role(&mut *self.storage, &seeded)?;
        }
        SeedLedger::create(
            &mut *self.storage,
            SeedTrackingRecord::new(
                entity.seed_id.clone(),
                entity.collection.clone(),
                seeded.id.clone(),
                checksum,
            ),
        )?;
        if let Some(last) = self.created.last_mut() {
            last.tracked = true;
        }

        Ok(seeded)
    }

    fn skip(
        &self,
        entity: &SeedEntity,
        record: &SeedTrackingRecord,
        data: Document,
    ) -> Result<SeededDocument> {
        let data = match self
            .storage
            .find_by_id(&record.collection, &record.document_id)?
        {
            Some(existing) => existing.data,
            None => {
                tracing::warn!(
                    run_id = %self.run_id,
                    seed_id = %entity.seed_id,
                    document_id = %record.document_id,
                    "tracked document is missing from storage"
                );
                data
            }
        };

        Ok(SeededDocument {
            id: record.document_id.clone(),
            seed_id: entity.seed_id.clone(),
            collection: record.collection.clone(),
            data,
            action: SeedAction::Skipped,
        })
    }

    fn update(
        &mut self,
        entity: &SeedEntity,
        record: &SeedTrackingRecord,
        mut data: Document,
        checksum: &str,
    ) -> Result<SeededDocument> {
        if entity.options.use_auth_signup {
            signup::strip_password(&mut data);
        }

        let updated = self
            .storage
            .update(&record.collection, &record.document_id, data)?;
        SeedLedger::update_checksum(&mut *self.storage, &entity.seed_id, checksum)?;

        Ok(SeededDocument {
            id: updated.id,
            seed_id: entity.seed_id.clone(),
            collection: record.collection.clone(),
            data: updated.data,
            action: SeedAction::Updated,
        })
    }
}
