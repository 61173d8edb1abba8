//! Seed parser with validation
//!
//! Parses YAML and validates schema version, seed id uniqueness and the
//! shape of every seed

#![allow(clippy::result_large_err)]

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedFileV0;
use seedkit_core::ledger::TRACKING_COLLECTION;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
///
/// # Errors
///
/// Returns `InvalidSeedFile` if the file cannot be read or fails validation.
pub fn parse_seed_file(path: &Path) -> Result<SeedFileV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file: {}", e)))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
///
/// # Errors
///
/// Returns `InvalidSeedFile` on malformed YAML or a validation failure.
pub fn parse_seed_str(content: &str) -> Result<SeedFileV0> {
    let seed: SeedFileV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedFileV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut seen = HashSet::new();
    for entity in &seed.seeds {
        if entity.seed_id.trim().is_empty() {
            return Err(seed_validation("Seed with empty seed_id"));
        }
        if !seen.insert(entity.seed_id.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate seed_id {}",
                entity.seed_id
            )));
        }
        if entity.collection.trim().is_empty() {
            return Err(seed_validation(&format!(
                "Seed {} has an empty collection",
                entity.seed_id
            )));
        }
        if entity.collection == TRACKING_COLLECTION {
            return Err(seed_validation(&format!(
                "Seed {} targets the reserved collection {}",
                entity.seed_id, TRACKING_COLLECTION
            )));
        }
        if !entity.data.is_object() {
            return Err(seed_validation(&format!(
                "Seed {} data must be a mapping",
                entity.seed_id
            )));
        }
    }

    Ok(())
}
