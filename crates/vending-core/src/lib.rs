//! # vending-core: Pure Business Logic for the Vending Machine
//!
//! This crate holds the cash-handling core of the machine: a
//! denomination-based change safe, plus the item storage it is paired with.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vending Machine Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            vending-sim (VendingMachine orchestrator)            │   │
//! │  │    insert_cash ──► purchase ──► receipt / change                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vending-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   safe    │  │  storage  │  │   money   │  │ validation│  │   │
//! │  │   │ChangeSafe │  │ItemStorage│  │   Money   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO LOCKING                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`safe`] - The change safe and its greedy payout policy
//! - [`storage`] - Items for sale and their stock
//! - [`types`] - Domain records shared with the frontend
//! - [`money`] - Integer money type
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vending_core::{ChangeMoneyUnit, ChangeSafe, Money, DEFAULT_DENOMINATIONS};
//!
//! let mut safe = ChangeSafe::new(
//!     &DEFAULT_DENOMINATIONS,
//!     &[ChangeMoneyUnit::new(100, 2), ChangeMoneyUnit::new(500, 1)],
//! )
//! .unwrap();
//!
//! assert_eq!(safe.amount(), Money::from_units(700));
//! assert!(safe.check_changeable(Money::from_units(700)));
//! assert_eq!(safe.do_change(Money::from_units(700)).unwrap(), vec![500, 100, 100]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod safe;
pub mod storage;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use safe::ChangeSafe;
pub use storage::ItemStorage;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Denominations the stock machine accepts and pays out, in won.
///
/// Coins 100 and 500, notes 1000, 5000 and 10000.
pub const DEFAULT_DENOMINATIONS: [i64; 5] = [100, 500, 1000, 5000, 10000];
