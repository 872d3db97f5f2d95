//! # Change Safe
//!
//! The cash box that pays out change.
//!
//! The safe holds one counter per configured denomination and answers two
//! questions: *can this amount be paid back exactly?* and *pay it back*.
//! Both are decided by the same greedy walk over the individual units.
//!
//! ## Greedy Walk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  counters: 100×2, 500×1, 1000×0        amount: 700                      │
//! │                                                                         │
//! │  flattened (value desc):  [500, 100, 100]                               │
//! │                                                                         │
//! │  unit  remainder  action                                                │
//! │  ────  ─────────  ──────────────────────────────                        │
//! │  500   700 → 200  take                                                  │
//! │  100   200 → 100  take                                                  │
//! │  100   100 →   0  take, stop → changeable                              │
//! │                                                                         │
//! │  A unit larger than the remainder is skipped. A unit that was taken     │
//! │  is never given back, so the walk can miss combinations that exist.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The walk is single-pass and never backtracks. It decides both which
//! amounts are reported changeable and which units leave the machine.
//!
//! ## Check, Then Act
//! [`ChangeSafe::do_change`] re-derives the flattened units from the counters
//! it sees at call time; nothing is carried over from an earlier
//! [`ChangeSafe::check_changeable`]. The safe has no internal locking. A caller
//! that shares it between threads holds one lock across both calls.

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ChangeMoneyUnit;
use crate::validation::{validate_denominations, validate_unit_count};

/// Denomination-based store of change.
///
/// ## Invariants
/// - Exactly one counter per configured denomination, in configured order
/// - The denomination set never changes after construction
/// - Counts are never negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSafe {
    units: Vec<ChangeMoneyUnit>,
}

impl ChangeSafe {
    /// Creates a safe for `denominations`, seeded from `seed`.
    ///
    /// Denominations missing from the seed start at zero. Seed entries for
    /// values that are not configured are ignored. If a value is seeded more
    /// than once, the first entry wins.
    ///
    /// ## Errors
    /// `CoreError::Validation` when the denomination list is empty, holds a
    /// non-positive or repeated value, or a seed count is negative.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::{ChangeMoneyUnit, ChangeSafe};
    ///
    /// let safe = ChangeSafe::new(&[100, 500], &[ChangeMoneyUnit::new(500, 1)]).unwrap();
    /// assert_eq!(safe.get_change_count(100).unwrap(), 0);
    /// assert_eq!(safe.get_change_count(500).unwrap(), 1);
    /// ```
    pub fn new(denominations: &[i64], seed: &[ChangeMoneyUnit]) -> CoreResult<Self> {
        validate_denominations(denominations)?;

        for ignored in seed.iter().filter(|u| !denominations.contains(&u.value)) {
            debug!(value = ignored.value, count = ignored.count, "Ignoring seed for unknown unit");
        }

        let units = denominations
            .iter()
            .map(|&value| {
                let count = seed
                    .iter()
                    .find(|u| u.value == value)
                    .map_or(0, |u| u.count);
                validate_unit_count(count)?;
                Ok(ChangeMoneyUnit::new(value, count))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(ChangeSafe { units })
    }

    /// Counters in configured order.
    #[inline]
    pub fn units(&self) -> &[ChangeMoneyUnit] {
        &self.units
    }

    /// Configured denominations, in configured order.
    pub fn denominations(&self) -> Vec<i64> {
        self.units.iter().map(|u| u.value).collect()
    }

    /// Total held: Σ value × count.
    pub fn amount(&self) -> Money {
        self.units.iter().map(ChangeMoneyUnit::subtotal).sum()
    }

    /// Every held unit as its own entry, largest value first.
    ///
    /// Rebuilt from the counters on every call.
    pub fn changeable_flat_units(&self) -> Vec<i64> {
        flat_units(&self.sorted_units()).collect()
    }

    /// Counters ordered by value, largest first (stable).
    fn sorted_units(&self) -> Vec<ChangeMoneyUnit> {
        let mut sorted = self.units.clone();
        sorted.sort_by(|a, b| b.value.cmp(&a.value));
        sorted
    }

    /// Whether `value` is a denomination this safe knows, regardless of count.
    #[inline]
    pub fn check_insertable(&self, value: i64) -> bool {
        self.units.iter().any(|u| u.value == value)
    }

    /// Units held for `value`.
    ///
    /// ## Errors
    /// `CoreError::InvalidUnit` if `value` is not configured.
    pub fn get_change_count(&self, value: i64) -> CoreResult<i64> {
        self.units
            .iter()
            .find(|u| u.value == value)
            .map(|u| u.count)
            .ok_or(CoreError::InvalidUnit { value })
    }

    /// Overwrites the counter for `value`. Other counters are untouched.
    ///
    /// ## Errors
    /// - `CoreError::InvalidUnit` if `value` is not configured
    /// - `CoreError::Validation` if `count` is negative or above `MAX_UNIT_COUNT`
    pub fn set_change_count(&mut self, value: i64, count: i64) -> CoreResult<()> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.value == value)
            .ok_or(CoreError::InvalidUnit { value })?;
        validate_unit_count(count)?;

        debug!(value, from = unit.count, to = count, "Change count overwritten");
        unit.count = count;
        Ok(())
    }

    /// Whether the greedy walk reaches exactly `amount`.
    ///
    /// A zero or negative amount is never changeable: no unit fits under it.
    pub fn check_changeable(&self, amount: Money) -> bool {
        greedy_walk(flat_units(&self.sorted_units()), amount.units(), |_| {})
    }

    /// Pays out `amount` and returns the dispensed values in selection order.
    ///
    /// Each selected unit is taken off its counter as it is selected; skipped
    /// units are left alone.
    ///
    /// ## Errors
    /// `CoreError::ImpossibleChange` when [`check_changeable`](Self::check_changeable)
    /// fails for `amount`. The safe is unchanged in that case.
    pub fn do_change(&mut self, amount: Money) -> CoreResult<Vec<i64>> {
        if !self.check_changeable(amount) {
            warn!(%amount, held = %self.amount(), "Change refused");
            return Err(CoreError::ImpossibleChange {
                amount: amount.units(),
            });
        }

        let sorted = self.sorted_units();
        let units = &mut self.units;
        let mut dispensed = Vec::new();
        greedy_walk(flat_units(&sorted), amount.units(), |value| {
            if let Some(unit) = units.iter_mut().find(|u| u.value == value) {
                unit.count -= 1;
                dispensed.push(value);
            }
        });

        info!(%amount, units = dispensed.len(), "Change dispensed");
        for (i, value) in dispensed.iter().enumerate() {
            debug!(unit = value, ordinal = i + 1, "Unit returned");
        }

        Ok(dispensed)
    }
}

/// Every unit of `sorted` in order, one entry per held unit, without
/// materializing the sequence.
fn flat_units(sorted: &[ChangeMoneyUnit]) -> impl Iterator<Item = i64> + '_ {
    sorted
        .iter()
        .flat_map(|u| std::iter::repeat(u.value).take(u.count.max(0) as usize))
}

/// Single left-to-right pass over `flat`, calling `take` for each unit used.
///
/// Returns `true` as soon as the remainder reaches zero.
fn greedy_walk(flat: impl Iterator<Item = i64>, amount: i64, mut take: impl FnMut(i64)) -> bool {
    let mut remainder = amount;

    for value in flat {
        if value > remainder {
            continue;
        }

        remainder -= value;
        // Unreachable: oversized units are skipped above.
        if remainder < 0 {
            return false;
        }

        take(value);
        if remainder == 0 {
            return true;
        }
    }

    false
}

// =============================================================================
// Unit Tests
// =============================================================================
