//! Collaborator interfaces consumed by the seeding engine
//!
//! - `Storage`: document persistence (plus the in-memory `MemoryStorage`)
//! - `IdentityProvider`: account creation for auth-signup seeds
//! - `SeedLogger`: human-facing progress output

pub mod identity;
pub mod logger;
pub mod memory_store;
pub mod storage;

pub use identity::{IdentityProvider, SignUpError, SignUpRequest, SignedUpUser};
pub use logger::{MemoryLogger, SeedLogger, TracingLogger};
pub use memory_store::MemoryStorage;
pub use storage::Storage;
