use seedkit_core_types::RunId;
use thiserror::Error;

/// Result type alias using SeedError
pub type Result<T> = std::result::Result<T, SeedError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every error the seeding engine can raise. Each
/// kind maps to a stable error code used by logging and by callers that
/// need to branch on the failure without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidConflictPolicy,
    InvalidSeedData,
    InvalidSeedFile,
    CredentialTooShort,

    // Conflict / ledger
    Conflict,
    AlreadyExists,
    NotFound,

    // Storage
    MissingDocumentId,
    Persistence,
    Serialization,

    // Identity provider
    ExternalService,

    // Run level
    Procedural,
    RolledBack,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidConflictPolicy => "ERR_INVALID_CONFLICT_POLICY",
            ExErrorKind::InvalidSeedData => "ERR_INVALID_SEED_DATA",
            ExErrorKind::InvalidSeedFile => "ERR_INVALID_SEED_FILE",
            ExErrorKind::CredentialTooShort => "ERR_CREDENTIAL_TOO_SHORT",
            ExErrorKind::Conflict => "ERR_SEED_CONFLICT",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingDocumentId => "ERR_MISSING_DOCUMENT_ID",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Procedural => "ERR_PROCEDURAL",
            ExErrorKind::RolledBack => "ERR_ROLLED_BACK",
        }
    }
}

/// Canonical structured error type
///
/// Structured view of a [`SeedError`] with classification fields for
/// programmatic handling and logging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    seed_id: Option<String>,
    collection: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            seed_id: None,
            collection: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add seed ID context
    pub fn with_seed_id(mut self, seed_id: impl Into<String>) -> Self {
        self.seed_id = Some(seed_id.into());
        self
    }

    /// Add collection context
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn seed_id(&self) -> Option<&str> {
        self.seed_id.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(seed_id) = &self.seed_id {
            write!(f, " (seed_id: {})", seed_id)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for seeding operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeedError {
    // ===== Conflict / Ledger =====
    /// Conflict policy `error` hit a seed id that is already tracked
    #[error("Seed '{seed_id}' already exists in collection '{collection}'")]
    Conflict { seed_id: String, collection: String },

    /// A tracking record for this seed id already exists
    #[error("Tracking record already exists for seed '{seed_id}'")]
    LedgerDuplicate { seed_id: String },

    /// No tracking record exists for this seed id
    #[error("Tracking record not found for seed '{seed_id}'")]
    TrackingRecordNotFound { seed_id: String },

    // ===== Validation =====
    /// Conflict policy value is not one of skip/update/error
    #[error("Invalid conflict policy '{value}': expected one of skip, update, error")]
    InvalidConflictPolicy { value: String },

    /// Seed data is not usable (e.g. not a JSON object)
    #[error("Invalid data for seed '{seed_id}': {reason}")]
    InvalidSeedData { seed_id: String, reason: String },

    /// Password supplied for auth-signup seeding is too short
    #[error("Password for seed '{seed_id}' must be at least {min_length} characters")]
    CredentialTooShort { seed_id: String, min_length: usize },

    /// Seed file failed to parse or validate
    #[error("Invalid seed file: {reason}")]
    InvalidSeedFile { reason: String },

    // ===== Storage =====
    /// Storage returned a document without a usable id
    #[error("Storage did not return a document id for seed '{seed_id}' in collection '{collection}'")]
    MissingDocumentId { seed_id: String, collection: String },

    /// Storage collaborator failure
    #[error("Storage error in {op}: {message}")]
    Storage { op: String, message: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ===== Identity Provider =====
    /// Identity provider reports that the account already exists
    #[error("Account for seed '{seed_id}' already exists (email: {email})")]
    AccountAlreadyExists { seed_id: String, email: String },

    /// Identity provider failed for any other reason
    #[error("Sign-up failed for seed '{seed_id}': {message}")]
    SignUpFailed { seed_id: String, message: String },

    // ===== Run Level =====
    /// Failure raised by a procedural seed function
    #[error("Seed function failed: {message}")]
    Procedural { message: String },

    /// A failed run whose creations were compensated
    #[error("{0}")]
    Rollback(Box<RollbackError>),
}

impl SeedError {
    /// Build a storage error for the given operation
    pub fn storage(op: impl Into<String>, message: impl Into<String>) -> Self {
        SeedError::Storage {
            op: op.into(),
            message: message.into(),
        }
    }

    /// Build an error raised from inside a procedural seed function
    pub fn procedural(message: impl Into<String>) -> Self {
        SeedError::Procedural {
            message: message.into(),
        }
    }

    /// The error that caused the run to fail, unwrapping a rollback
    pub fn original(&self) -> &SeedError {
        match self {
            SeedError::Rollback(rollback) => &rollback.original_error,
            other => other,
        }
    }

    /// Rollback details, if this error wraps a compensated run
    pub fn rollback(&self) -> Option<&RollbackError> {
        match self {
            SeedError::Rollback(rollback) => Some(&**rollback),
            _ => None,
        }
    }

    /// True for a conflict raised by the `error` policy
    pub fn is_conflict(&self) -> bool {
        matches!(self, SeedError::Conflict { .. })
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Serialization {
            message: err.to_string(),
        }
    }
}

/// A creation that was successfully compensated during rollback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolledBackSeed {
    pub seed_id: String,
    pub collection: String,
    pub document_id: String,
}

/// A creation whose compensating delete failed
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackFailure {
    pub seed_id: String,
    pub collection: String,
    pub document_id: String,
    pub error: SeedError,
}

/// Aggregate of a failed run and the compensation attempted for it
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackError {
    pub original_error: SeedError,
    /// Compensated creations, most recent first
    pub rolled_back_seeds: Vec<RolledBackSeed>,
    pub rollback_failures: Vec<RollbackFailure>,
}

impl RollbackError {
    /// True when every creation of the run was removed
    pub fn is_complete(&self) -> bool {
        self.rollback_failures.is_empty()
    }
}

impl std::fmt::Display for RollbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Seeding failed and was rolled back ({} seed(s) removed",
            self.rolled_back_seeds.len()
        )?;
        if !self.rollback_failures.is_empty() {
            write!(f, ", {} rollback failure(s)", self.rollback_failures.len())?;
        }
        write!(f, "): {}", self.original_error)
    }
}

impl std::error::Error for RollbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.original_error)
    }
}

impl From<RollbackError> for SeedError {
    fn from(err: RollbackError) -> Self {
        SeedError::Rollback(Box::new(err))
    }
}

impl From<SeedError> for ExError {
    fn from(err: SeedError) -> Self {
        let message = err.to_string();
        match err {
            SeedError::Conflict {
                seed_id,
                collection,
            } => ExError::new(ExErrorKind::Conflict)
                .with_op("resolve_conflict")
                .with_seed_id(seed_id)
                .with_collection(collection)
                .with_message(message),

            SeedError::LedgerDuplicate { seed_id } => ExError::new(ExErrorKind::AlreadyExists)
                .with_op("ledger_create")
                .with_seed_id(seed_id)
                .with_message(message),

            SeedError::TrackingRecordNotFound { seed_id } => ExError::new(ExErrorKind::NotFound)
                .with_seed_id(seed_id)
                .with_message(message),

            SeedError::InvalidConflictPolicy { .. } => {
                ExError::new(ExErrorKind::InvalidConflictPolicy).with_message(message)
            }

            SeedError::InvalidSeedData { seed_id, .. } => {
                ExError::new(ExErrorKind::InvalidSeedData)
                    .with_seed_id(seed_id)
                    .with_message(message)
            }

            SeedError::CredentialTooShort { seed_id, .. } => {
                ExError::new(ExErrorKind::CredentialTooShort)
                    .with_op("auth_signup")
                    .with_seed_id(seed_id)
                    .with_message(message)
            }

            SeedError::InvalidSeedFile { .. } => ExError::new(ExErrorKind::InvalidSeedFile)
                .with_op("seed_parse")
                .with_message(message),

            SeedError::MissingDocumentId {
                seed_id,
                collection,
            } => ExError::new(ExErrorKind::MissingDocumentId)
                .with_op("storage_create")
                .with_seed_id(seed_id)
                .with_collection(collection)
                .with_message(message),

            SeedError::Storage { op, .. } => ExError::new(ExErrorKind::Persistence)
                .with_op(op)
                .with_message(message),

            SeedError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SeedError::AccountAlreadyExists { seed_id, .. } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_op("auth_signup")
                    .with_seed_id(seed_id)
                    .with_message(message)
            }

            SeedError::SignUpFailed { seed_id, .. } => ExError::new(ExErrorKind::ExternalService)
                .with_op("auth_signup")
                .with_seed_id(seed_id)
                .with_message(message),

            SeedError::Procedural { .. } => ExError::new(ExErrorKind::Procedural)
                .with_op("seed_fn")
                .with_message(message),

            SeedError::Rollback(rollback) => ExError::new(ExErrorKind::RolledBack)
                .with_op("rollback")
                .with_message(message)
                .with_source(rollback.original_error.into()),
        }
    }
}
