//! # API Error Envelope
//!
//! What the storefront receives when a catalog operation fails.
//!
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "Validation failed for categories",
//!   "retryable": false,
//!   "fieldErrors": [{ "field": "categories", "message": "categories is required" }]
//! }
//! ```
//!
//! Internal details (SQL messages, constraint names) are logged and replaced
//! by a generic message.

use serde::Serialize;

use crate::error::{CatalogError, DbError};
use market_core::{CoreError, FieldError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Whether the UI should offer "try again"
    pub retryable: bool,

    pub field_errors: Vec<FieldMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

impl From<&FieldError> for FieldMessage {
    fn from(err: &FieldError) -> Self {
        FieldMessage {
            field: err.path.clone(),
            message: err.error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Acting seller may not touch the resource (403)
    Forbidden,

    /// Resource not found (404)
    NotFound,

    /// Resource already exists (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Transaction timed out (503)
    Timeout,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>, retryable: bool) -> Self {
        ApiError {
            code,
            message: message.into(),
            retryable,
            field_errors: Vec::new(),
        }
    }

    fn with_fields(mut self, errors: &[FieldError]) -> Self {
        self.field_errors = errors.iter().map(FieldMessage::from).collect();
        self
    }
}

impl From<&CoreError> for ApiError {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::InvalidSubmission(_) | CoreError::Validation(_) => {
                ApiError::new(ErrorCode::ValidationError, err.to_string(), false)
                    .with_fields(&err.field_errors())
            }
            CoreError::StoreNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string(), false),
            CoreError::StoreNotOwned { .. } | CoreError::NotASeller(_) => {
                ApiError::new(ErrorCode::Forbidden, "You cannot manage this store", false)
            }
            CoreError::StoreInactive(_) => {
                ApiError::new(ErrorCode::ValidationError, err.to_string(), false)
            }
            CoreError::AlreadySeller(_) => ApiError::new(ErrorCode::Conflict, err.to_string(), false),
        }
    }
}

impl From<&DbError> for ApiError {
    fn from(err: &DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string(), false),
            DbError::UniqueViolation { .. } => {
                // Slug/SKU suffix collisions land here; a retry derives new ones.
                tracing::warn!(error = %err, "Unique constraint hit");
                ApiError::new(ErrorCode::Conflict, "Please try again", true)
            }
            _ => {
                tracing::error!(error = %err, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Something went wrong, please try again", true)
            }
        }
    }
}

impl From<&CatalogError> for ApiError {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Core(core) => ApiError::from(core),
            CatalogError::Db(db) => ApiError::from(db),
            CatalogError::Timeout(_) => {
                ApiError::new(ErrorCode::Timeout, "The request took too long, please try again", true)
            }
            CatalogError::MissingProductId | CatalogError::VariantStage(_) => {
                tracing::error!(error = %err, "Product transaction aborted");
                ApiError::new(ErrorCode::Internal, "Something went wrong, please try again", true)
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::from(&err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::{RecordSet, SubmissionError, ValidationError};
    use std::time::Duration;

    #[test]
    fn test_validation_envelope_carries_fields() {
        let err: CatalogError = SubmissionError::single(
            RecordSet::Tags,
            vec![FieldError::new(
                "tags[0].name",
                ValidationError::TooShort {
                    field: "name".to_string(),
                    min: 3,
                },
            )],
        )
        .into();

        let api = ApiError::from(err);
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert!(!api.retryable);
        assert_eq!(
            api.field_errors,
            vec![FieldMessage {
                field: "tags[0].name".to_string(),
                message: "name must be at least 3 characters".to_string(),
            }]
        );

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["fieldErrors"][0]["field"], "tags[0].name");
    }

    #[test]
    fn test_persistence_failures_are_generic() {
        let api = ApiError::from(CatalogError::Db(DbError::QueryFailed(
            "no such table: products".to_string(),
        )));
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(api.retryable);
        assert!(!api.message.contains("products"));

        let api = ApiError::from(CatalogError::Timeout(Duration::from_secs(30)));
        assert_eq!(api.code, ErrorCode::Timeout);
    }

    #[test]
    fn test_foreign_store_is_forbidden() {
        let api = ApiError::from(CatalogError::Core(CoreError::StoreNotOwned {
            store_id: "s".to_string(),
            seller_id: "x".to_string(),
        }));
        assert_eq!(api.code, ErrorCode::Forbidden);
    }
}
