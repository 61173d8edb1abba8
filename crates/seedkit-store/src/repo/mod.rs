//! Repository layer
//!
//! Bridges the engine's `Storage` interface to SQLite

pub mod sqlite_storage;

pub use sqlite_storage::SqliteStorage;
