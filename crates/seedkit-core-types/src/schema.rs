//! Canonical schema constants for structured logging
//!
//! These constants keep field names consistent across the seeding engine,
//! the storage adapters and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Seed identifiers
pub const FIELD_SEED_ID: &str = "seed_id";
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_ACTION: &str = "action";

// Run counters
pub const FIELD_CREATED: &str = "created";
pub const FIELD_UPDATED: &str = "updated";
pub const FIELD_SKIPPED: &str = "skipped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
