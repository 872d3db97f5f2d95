//! # Machine Error Type
//!
//! What the caller of the orchestrator sees when an operation fails.
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "IMPOSSIBLE_CHANGE",
//!   "message": "Exact change unavailable for ₩800"
//! }
//! ```

use serde::Serialize;
use vending_core::{CoreError, Money};

use crate::config::ConfigError;

/// Error returned by the orchestrator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for machine responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Coin or note the machine does not take
    InvalidUnit,

    /// The safe cannot pay the change due
    ImpossibleChange,

    /// Inserted credit is below the sell price
    InsufficientCredit,

    /// No item with that name
    NotFound,

    /// Item has no stock left
    OutOfStock,

    /// Input or configuration validation failed
    ValidationError,

    /// Anything else
    Internal,
}

impl MachineError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        MachineError {
            code,
            message: message.into(),
        }
    }

    pub fn insufficient_credit(inserted: Money, price: Money) -> Self {
        MachineError::new(
            ErrorCode::InsufficientCredit,
            format!("Inserted {} but the price is {}", inserted, price),
        )
    }
}

/// Converts core errors to machine errors.
impl From<CoreError> for MachineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUnit { value } => MachineError::new(
                ErrorCode::InvalidUnit,
                format!("{} is not an accepted unit", Money::from_units(value)),
            ),
            CoreError::ImpossibleChange { amount } => MachineError::new(
                ErrorCode::ImpossibleChange,
                format!("Exact change unavailable for {}", Money::from_units(amount)),
            ),
            CoreError::ItemNotFound(name) => {
                MachineError::new(ErrorCode::NotFound, format!("Item not found: {}", name))
            }
            CoreError::OutOfStock { name, .. } => {
                MachineError::new(ErrorCode::OutOfStock, format!("{} is sold out", name))
            }
            CoreError::Validation(e) => MachineError::new(ErrorCode::ValidationError, e.to_string()),
        }
    }
}

impl From<ConfigError> for MachineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => {
                tracing::error!("Config load failed: {}", err);
                MachineError::new(ErrorCode::Internal, err.to_string())
            }
            other => MachineError::new(ErrorCode::ValidationError, other.to_string()),
        }
    }
}

impl std::fmt::Display for MachineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}

/// Convenience type alias for orchestrator results.
pub type MachineResult<T> = Result<T, MachineError>;
