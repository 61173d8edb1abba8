//! Error helpers for seedkit-store
//!
//! Everything surfaces as a `SeedError` so the engine can propagate store
//! failures unchanged.

use seedkit_core::errors::SeedError;
use seedkit_core::ledger::TRACKING_COLLECTION;

/// Result type alias using SeedError
pub type Result<T> = std::result::Result<T, SeedError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> SeedError {
    SeedError::storage(
        "migration",
        format!("Migration {} failed: {}", migration_id, reason),
    )
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> SeedError {
    SeedError::storage(
        "migration_checksum",
        format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ),
    )
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> SeedError {
    SeedError::InvalidSeedFile {
        reason: reason.to_string(),
    }
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> SeedError {
    SeedError::storage("sqlite", err.to_string())
}

/// Map an insert failure, turning a tracking-row uniqueness violation into
/// `LedgerDuplicate`
pub fn from_insert(err: rusqlite::Error, collection: &str, seed_id: Option<&str>) -> SeedError {
    match (&err, seed_id) {
        (rusqlite::Error::SqliteFailure(failure, _), Some(seed_id))
            if collection == TRACKING_COLLECTION
                && failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            SeedError::LedgerDuplicate {
                seed_id: seed_id.to_string(),
            }
        }
        _ => from_rusqlite(err),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> SeedError {
    SeedError::storage(operation, err.to_string())
}
