//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError ← Adds context and categorization                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError ← + CoreError (validation, ownership), timeouts,         │
//! │       │          missing generated ids                                  │
//! │       ▼                                                                 │
//! │  ApiError (api.rs) ← Serialized for the storefront                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use market_core::{CoreError, FieldError, SubmissionError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - SKU or slug suffix collision
    /// - Second seller account for the same phone number
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (e.g., an unknown status token).
    #[error("Check constraint failed: {message}")]
    CheckViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                // "CHECK constraint failed: <expr>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Catalog Error
// =============================================================================

/// Everything `create_product` (and the onboarding writes) can fail with.
///
/// ## Caller Reaction
/// ```text
/// Core(..)              → fix your input   (shown inline per field)
/// MissingProductId      → try again later  (persistence contract broken)
/// VariantStage(..)      → try again later  (phase-2 validation failed)
/// Db(..)                → try again later  (transaction rolled back)
/// Timeout(..)           → try again later  (transaction dropped)
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Validation or ownership rule violated before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The product insert returned no generated id.
    #[error("Product insert returned no generated id")]
    MissingProductId,

    /// Variants failed re-validation after the product id was stamped on.
    #[error("Variant stage failed: {0}")]
    VariantStage(SubmissionError),

    /// A statement failed; the transaction was rolled back.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The transaction did not finish in time and was rolled back.
    #[error("Transaction timed out after {0:?}")]
    Timeout(Duration),
}

impl CatalogError {
    /// True when the same request may succeed if retried later.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CatalogError::Core(_))
    }

    /// Field-level messages to show next to form inputs.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            CatalogError::Core(err) => err.field_errors(),
            CatalogError::VariantStage(err) => err.field_errors().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Db(err.into())
    }
}

impl From<SubmissionError> for CatalogError {
    fn from(err: SubmissionError) -> Self {
        CatalogError::Core(CoreError::InvalidSubmission(err))
    }
}

/// Result type for catalog workflows.
pub type CatalogResult<T> = Result<T, CatalogError>;
