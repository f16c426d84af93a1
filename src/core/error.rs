//! Typed error handling
//!
//! # Error Categories
//!
//! - [`FieldValidationError`]: a field check failed while validating an entity
//! - [`UnrecognizedSortDirection`]: a sort token is neither ascending nor descending
//! - [`ConfigError`]: configuration is missing or malformed
//! - [`CoreError`]: wraps all of the above plus lookups, uniqueness conflicts and storage failures
//!
//! Cryptographic failures are absent on purpose: the field cipher resolves
//! them locally and never surfaces them.
//!
//! # Example
//!
//! ```rust,ignore
//! use gettogether::prelude::*;
//!
//! match service.save(event) {
//!     Ok(saved) => println!("saved {:?}", saved.id),
//!     Err(CoreError::Validation(err)) => {
//!         println!("rejected field {}: {}", err.field(), err.reason());
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type of the crate
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] FieldValidationError),

    #[error(transparent)]
    Sort(#[from] UnrecognizedSortDirection),

    /// Lookup returned nothing
    #[error("No {entity} found for {criteria}")]
    NotFound { entity: String, criteria: String },

    /// A unique field already holds this value
    #[error("{field}: {value} already in use")]
    AlreadyInUse { field: String, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Backing store failure
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CoreError {
    pub fn not_found(entity: impl Into<String>, criteria: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            criteria: criteria.into(),
        }
    }

    pub fn already_in_use(field: impl Into<String>, value: impl Into<String>) -> Self {
        CoreError::AlreadyInUse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Sort(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::AlreadyInUse { .. } => StatusCode::NOT_ACCEPTABLE,
            CoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Sort(_) => "INVALID_SORT_DIRECTION",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::AlreadyInUse { .. } => "ALREADY_IN_USE",
            CoreError::Config(_) => "CONFIG_ERROR",
            CoreError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CoreError::Validation(err) => Some(serde_json::json!({
                "field": err.field(),
                "reason": err.reason(),
            })),
            CoreError::Sort(err) => Some(serde_json::json!({ "token": err.token() })),
            CoreError::AlreadyInUse { field, value } => Some(serde_json::json!({
                "field": field,
                "value": value,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A field check failed
///
/// Displays as `"{field}: {reason}"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct FieldValidationError {
    field: String,
    reason: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Label of the rejected field
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Message reported by the failing rule
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

// =============================================================================
// Sort Errors
// =============================================================================

/// A sort token matched neither direction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized sort direction '{token}', expected 'asc' or 'desc'")]
pub struct UnrecognizedSortDirection {
    token: String,
}

impl UnrecognizedSortDirection {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The token as supplied by the caller
    pub fn token(&self) -> &str {
        &self.token
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No cipher key in the configuration or the environment
    #[error("Cipher key is missing; set cipher.key or GETTOGETHER_CIPHER_KEY")]
    MissingCipherKey,

    /// Key material has the wrong size
    #[error("Cipher key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A value could not be parsed
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
}
