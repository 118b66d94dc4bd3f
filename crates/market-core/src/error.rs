//! # Error Types
//!
//! Domain-specific error types for market-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  market-core errors (this file)                                        │
//! │  ├── ValidationError  - One field failed one rule                      │
//! │  ├── FieldError       - ValidationError + the field path               │
//! │  ├── SubmissionError  - Every failed record set of a submission        │
//! │  └── CoreError        - Domain rule violations (ownership, roles)      │
//! │                                                                         │
//! │  market-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── CatalogError     - What create_product returns                    │
//! │                                                                         │
//! │  Flow: ValidationError → SubmissionError → CoreError → CatalogError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Every variant is a "fix your input" error: retrying the same request will
/// fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The submission failed phase-1 or phase-2 validation.
    #[error(transparent)]
    InvalidSubmission(#[from] SubmissionError),

    /// The referenced store does not exist.
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// The store exists but belongs to another seller.
    ///
    /// ## When This Occurs
    /// - A forged or stale `storeId` in the product form
    /// - A seller switching accounts with a cached store list
    #[error("Store {store_id} is not owned by seller {seller_id}")]
    StoreNotOwned { store_id: String, seller_id: String },

    /// The store is deactivated and cannot receive new products.
    #[error("Store {0} is not active")]
    StoreInactive(String),

    /// The user has no seller account.
    #[error("User {0} is not a seller")]
    NotASeller(String),

    /// The user already has a seller account.
    #[error("User {0} already has a seller account")]
    AlreadySeller(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the field-level errors carried by this error, if any.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            CoreError::InvalidSubmission(err) => err.field_errors().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any database work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid slug).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two tags with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A checkbox that must be ticked was not.
    #[error("{field} must be accepted")]
    MustAccept { field: String },
}

// =============================================================================
// Submission Errors
// =============================================================================

/// The record sets a submission is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecordSet {
    Product,
    Variants,
    Categories,
    Tags,
    Store,
    Seller,
}

impl RecordSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordSet::Product => "product",
            RecordSet::Variants => "variants",
            RecordSet::Categories => "categories",
            RecordSet::Tags => "tags",
            RecordSet::Store => "store",
            RecordSet::Seller => "seller",
        }
    }
}

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure located at a field path such as `variants[1].size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub error: ValidationError,
}

impl FieldError {
    pub fn new(path: impl Into<String>, error: ValidationError) -> Self {
        FieldError {
            path: path.into(),
            error,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.error)
    }
}

/// All failures of one record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFailure {
    pub set: RecordSet,
    pub errors: Vec<FieldError>,
}

/// A submission that failed validation.
///
/// Carries every failed record set so the UI can show all messages at once
/// instead of one per round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionError {
    failures: Vec<SetFailure>,
}

impl SubmissionError {
    pub fn new() -> Self {
        SubmissionError::default()
    }

    /// Shorthand for an error with a single failed set.
    pub fn single(set: RecordSet, errors: Vec<FieldError>) -> Self {
        let mut err = SubmissionError::new();
        err.push(set, errors);
        err
    }

    /// Records the failures of a set. Empty error lists are ignored.
    pub fn push(&mut self, set: RecordSet, errors: Vec<FieldError>) {
        if errors.is_empty() {
            return;
        }
        match self.failures.iter_mut().find(|f| f.set == set) {
            Some(existing) => existing.errors.extend(errors),
            None => self.failures.push(SetFailure { set, errors }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[SetFailure] {
        &self.failures
    }

    /// Record sets that failed, in the order they were checked.
    pub fn failed_sets(&self) -> Vec<RecordSet> {
        self.failures.iter().map(|f| f.set).collect()
    }

    pub fn has_failed(&self, set: RecordSet) -> bool {
        self.failures.iter().any(|f| f.set == set)
    }

    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.failures.iter().flat_map(|f| f.errors.iter())
    }

    /// Converts a non-empty collector into `Err`.
    pub fn into_result(self) -> Result<(), SubmissionError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets: Vec<&str> = self.failures.iter().map(|s| s.set.as_str()).collect();
        write!(f, "Validation failed for {}", sets.join(", "))
    }
}

impl std::error::Error for SubmissionError {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
