//! Seeding data model
//!
//! - `SeedEntity`: one declarative/imperative seeding instruction
//! - `SeedTrackingRecord`: ledger row linking a seed id to its document
//! - `SeededDocument` / `SeedingResult`: transient run outcomes
//! - `SeedingOptions`: run-wide configuration

pub mod document;
pub mod entity;
pub mod options;
pub mod outcome;
pub mod tracking;

pub use document::{Document, StoredDocument};
pub use entity::{SeedEntity, SeedEntityOptions};
pub use options::{ConflictPolicy, RunOnStart, SeedingOptions};
pub use outcome::{SeedAction, SeededDocument, SeedingResult};
pub use tracking::SeedTrackingRecord;
