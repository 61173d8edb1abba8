use serde::Serialize;
use std::fmt;

use crate::model::Document;

/// What processing a seed entity did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedAction {
    Created,
    Updated,
    Skipped,
}

impl SeedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedAction::Created => "created",
            SeedAction::Updated => "updated",
            SeedAction::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SeedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one seed entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeededDocument {
    /// Storage id of the document
    pub id: String,
    pub seed_id: String,
    pub collection: String,
    pub data: Document,
    pub action: SeedAction,
}

/// Summary of a seeding run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedingResult {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Every processed seed, in processing order
    pub seeds: Vec<SeededDocument>,
}

impl SeedingResult {
    pub fn from_seeds(seeds: Vec<SeededDocument>) -> Self {
        let count = |action| seeds.iter().filter(|s| s.action == action).count();
        Self {
            total: seeds.len(),
            created: count(SeedAction::Created),
            updated: count(SeedAction::Updated),
            skipped: count(SeedAction::Skipped),
            seeds,
        }
    }
}
