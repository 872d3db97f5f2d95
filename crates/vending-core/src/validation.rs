//! # Validation Module
//!
//! Input validation for safe configuration and machine setup.
//!
//! ## Usage
//! ```rust
//! use vending_core::validation::{validate_denominations, validate_unit_count};
//!
//! validate_denominations(&[100, 500, 1000]).unwrap();
//! assert!(validate_unit_count(-1).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest denomination value a safe accepts.
pub const MAX_DENOMINATION_VALUE: i64 = 1_000_000_000;

/// Most units one counter may hold.
///
/// Keeps value × count well inside `i64` and bounds the greedy walk.
pub const MAX_UNIT_COUNT: i64 = 1_000_000;

// =============================================================================
// Denomination Validators
// =============================================================================

/// Validates the denomination list a safe is configured with.
///
/// ## Rules
/// - Must not be empty
/// - Every value must be positive (> 0) and at most `MAX_DENOMINATION_VALUE`
/// - No value may appear twice
///
/// Order is not checked; the safe keeps whatever order it is given.
///
/// ## Example
/// ```rust
/// use vending_core::validation::validate_denominations;
///
/// assert!(validate_denominations(&[100, 500]).is_ok());
/// assert!(validate_denominations(&[]).is_err());
/// assert!(validate_denominations(&[100, 0]).is_err());
/// assert!(validate_denominations(&[500, 500]).is_err());
/// ```
pub fn validate_denominations(values: &[i64]) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::Required {
            field: "denominations".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(values.len());
    for &value in values {
        if value <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "denomination".to_string(),
            });
        }
        if value > MAX_DENOMINATION_VALUE {
            return Err(ValidationError::OutOfRange {
                field: "denomination".to_string(),
                min: 1,
                max: MAX_DENOMINATION_VALUE,
            });
        }
        if !seen.insert(value) {
            return Err(ValidationError::Duplicate {
                field: "denomination".to_string(),
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit count for a denomination counter.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (empty slot)
/// - Must not exceed `MAX_UNIT_COUNT`
pub fn validate_unit_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "count".to_string(),
        });
    }

    if count > MAX_UNIT_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: MAX_UNIT_COUNT,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_denominations() {
        assert!(validate_denominations(&[100, 500, 1000, 5000, 10000]).is_ok());
        assert!(validate_denominations(&[1]).is_ok());
        assert!(validate_denominations(&[1000, 100]).is_ok());

        assert!(matches!(
            validate_denominations(&[]),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_denominations(&[100, -500]),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_denominations(&[100, 500, 100]),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_denominations(&[MAX_DENOMINATION_VALUE]).is_ok());
        assert!(matches!(
            validate_denominations(&[100, MAX_DENOMINATION_VALUE + 1]),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_unit_count() {
        assert!(validate_unit_count(0).is_ok());
        assert!(validate_unit_count(42).is_ok());
        assert!(validate_unit_count(-1).is_err());
        assert!(validate_unit_count(MAX_UNIT_COUNT).is_ok());
        assert!(matches!(
            validate_unit_count(MAX_UNIT_COUNT + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_unit_count(i64::MAX / 1000).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Cola").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(101)).is_err());
    }
}
