//! # Error Types
//!
//! Domain-specific error types for vending-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vending-core errors (this file)                                       │
//! │  ├── CoreError        - Safe and storage failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vending-sim errors (app)                                              │
//! │  └── MachineError     - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → MachineError → Caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The value is not one of the denominations the safe was configured with.
    ///
    /// ## When This Occurs
    /// - `get_change_count` / `set_change_count` with an unknown value
    /// - Inserting a coin or note the machine does not accept
    ///
    /// Callers are expected to screen values with `check_insertable` first.
    #[error("Invalid unit: {value}")]
    InvalidUnit { value: i64 },

    /// The greedy walk cannot make exact change for the amount.
    ///
    /// The safe is left untouched when this is returned.
    ///
    /// ## User Workflow
    /// ```text
    /// Purchase (change due: 800)
    ///      │
    ///      ▼
    /// check_changeable(800) = false
    ///      │
    ///      ▼
    /// ImpossibleChange { amount: 800 }
    ///      │
    ///      ▼
    /// UI shows: "Exact change unavailable"
    /// ```
    #[error("Impossible change for amount {amount}")]
    ImpossibleChange { amount: i64 },

    /// No item with that name is held in storage.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but has no stock left.
    #[error("Item out of stock: {name} (stock {stock})")]
    OutOfStock { name: String, stock: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Duplicate value (e.g., a denomination listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::InvalidUnit { value: 50 }.to_string(),
            "Invalid unit: 50"
        );
        assert_eq!(
            CoreError::ImpossibleChange { amount: 800 }.to_string(),
            "Impossible change for amount 800"
        );
        assert_eq!(
            CoreError::OutOfStock {
                name: "Cola".to_string(),
                stock: 0
            }
            .to_string(),
            "Item out of stock: Cola (stock 0)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustNotBeNegative {
            field: "count".to_string(),
        };
        assert_eq!(err.to_string(), "count must not be negative");

        let err = ValidationError::Duplicate {
            field: "denomination".to_string(),
            value: "500".to_string(),
        };
        assert_eq!(err.to_string(), "denomination '500' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
