//! Unified error handling for the storefront engine.
//!
//! Each module defines its own `thiserror` enum; `AppError` aggregates them so
//! shell code (the CLI) can hold a single error type. Validation failures are
//! deliberately NOT errors - they are ordinary return values (field-to-message
//! maps) because a failed form submission is a recoverable UI state, not a
//! fault.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Field-level validation messages, keyed by field name.
///
/// Empty means the input is valid and submission may proceed.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Application-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisted state could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout submission failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");
    }
}
