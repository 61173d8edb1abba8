//! SeedKit Store - SQLite persistence and seed files
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - `SqliteStorage`, a document store implementing the engine's `Storage`
//! - Seed file format v0 (YAML) parser with validation

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteStorage;
