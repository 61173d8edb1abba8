//! Seed Format v0 schema
//!
//! Defines the YAML structure of a seed file

use serde::{Deserialize, Serialize};
use seedkit_core::{SeedConfig, SeedEntity, SeedingOptions};

/// Top-level seed file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedFileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Run-wide options; every field is optional
    #[serde(default)]
    pub options: SeedingOptions,

    /// Seeds, applied in file order
    #[serde(default)]
    pub seeds: Vec<SeedEntity>,
}

impl SeedFileV0 {
    /// Seeding configuration running every seed of the file as a default
    pub fn into_config(self) -> SeedConfig<'static> {
        SeedConfig::new()
            .with_options(self.options)
            .with_entities(self.seeds)
    }
}
