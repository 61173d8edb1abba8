//! SeedKit Core - Idempotent database seeding engine
//!
//! This crate provides the seeding engine and its collaborator interfaces,
//! including:
//! - Content checksums of seed data (key-order insensitive)
//! - The seed ledger recording which seeds produced which documents
//! - Conflict resolution (skip / update / error) against the ledger
//! - The executor with transactional-style rollback of failed runs
//! - A startup gate deciding whether seeding runs automatically
//!
//! Storage, identity and logging are consumed through the traits in [`ops`].

pub mod builder;
pub mod checksum;
pub mod conflict;
pub mod errors;
pub mod executor;
pub mod gate;
pub mod ledger;
pub mod logging_facility;
pub mod model;
pub mod ops;

pub use seedkit_core_types::schema;

// Re-export commonly used types
pub use builder::{CollectionSeeds, SeedBuilder};
pub use checksum::checksum;
pub use errors::{ExError, ExErrorKind, Result, RollbackError, SeedError};
pub use executor::{run_seeding, SeedConfig, SeedContext, SeedExecutor};
pub use gate::{should_run_seeding, should_run_seeding_from_env};
pub use ledger::{SeedLedger, TRACKING_COLLECTION};
pub use model::{
    ConflictPolicy, Document, RunOnStart, SeedAction, SeedEntity, SeededDocument, SeedingOptions,
    SeedingResult, SeedTrackingRecord, StoredDocument,
};
pub use ops::{IdentityProvider, MemoryStorage, SeedLogger, Storage};
