//! Seed files
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation

pub mod format_v0;
pub mod parser;

pub use format_v0::SeedFileV0;
pub use parser::{parse_seed_file, parse_seed_str};
