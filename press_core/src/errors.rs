//! # Error Types
//!
//! Structured error types for press_core. Planner-style calculators signal
//! "insufficient input" by returning `Option`; the errors here cover the
//! message-carrying calculators (roll length) and the product store / file
//! layer, where the operator needs to be told *which* input or operation
//! went wrong.
//!
//! ## Example
//!
//! ```rust
//! use press_core::errors::{PlanError, PlanResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> PlanResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(PlanError::invalid_input(
//!             "thickness_mm",
//!             thickness_mm.to_string(),
//!             "All numeric inputs must be greater than 0.",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for press_core operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Structured error type for calculator and store operations.
///
/// Each variant carries enough context for the UI collaborator to show a
/// meaningful message without enumerating conditions itself.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PlanError {
    /// An input value is invalid (blank, out of range, inconsistent)
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Product identifier not present in the store
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Attempted to edit or delete a built-in product
    #[error("Product is built-in and cannot be modified: {product_id}")]
    ImmutableProduct { product_id: String },

    /// A product import payload failed validation
    #[error("Import rejected: {reason}")]
    ImportRejected { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Product list is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl PlanError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ProductNotFound error
    pub fn product_not_found(product_id: impl Into<String>) -> Self {
        PlanError::ProductNotFound {
            product_id: product_id.into(),
        }
    }

    /// Create an ImmutableProduct error
    pub fn immutable_product(product_id: impl Into<String>) -> Self {
        PlanError::ImmutableProduct {
            product_id: product_id.into(),
        }
    }

    /// Create an ImportRejected error
    pub fn import_rejected(reason: impl Into<String>) -> Self {
        PlanError::ImportRejected {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PlanError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        PlanError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PlanError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            PlanError::ImmutableProduct { .. } => "IMMUTABLE_PRODUCT",
            PlanError::ImportRejected { .. } => "IMPORT_REJECTED",
            PlanError::FileError { .. } => "FILE_ERROR",
            PlanError::FileLocked { .. } => "FILE_LOCKED",
            PlanError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PlanError::invalid_input("roll_outer_cm", "", "Roll outer diameter is required.");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: PlanError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlanError::product_not_found("p76x51").error_code(),
            "PRODUCT_NOT_FOUND"
        );
        assert_eq!(
            PlanError::import_rejected("not an array").error_code(),
            "IMPORT_REJECTED"
        );
    }

    #[test]
    fn test_display_carries_reason() {
        let error = PlanError::invalid_input(
            "roll_outer_cm",
            "5.0",
            "Roll outer diameter must be greater than the inner diameter.",
        );
        assert!(error
            .to_string()
            .contains("Roll outer diameter must be greater than the inner diameter."));
    }
}
