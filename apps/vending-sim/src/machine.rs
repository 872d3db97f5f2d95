//! # Vending Machine
//!
//! Owns the change safe and the item storage, and sequences them for a
//! purchase. Neither collaborator knows about the other.
//!
//! ## Cash Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_cash(1000) ─┐                                                   │
//! │  insert_cash(500)  ─┴─► escrow [1000, 500]   credit ₩1,500              │
//! │                                                                         │
//! │  purchase("Cola", Cash)        sell price ₩1,100                        │
//! │       │                                                                 │
//! │       ├── item missing / sold out?   → NotFound / OutOfStock           │
//! │       ├── credit < price?            → InsufficientCredit              │
//! │       ├── deposit escrow into safe                                      │
//! │       ├── safe.do_change(₩400) fails → restore safe, keep escrow       │
//! │       ├── storage.release(item)                                         │
//! │       └── record purchase ──► PurchaseReceipt { change: [100 × 4] }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The safe and the storage are mutated in separate steps. Change is paid
//! before the item is released, so a refused payout leaves both untouched.

use serde::Serialize;
use tracing::info;
use vending_core::{
    ChangeMoneyUnit, ChangeSafe, CoreError, ItemForSale, ItemStorage, Money, PaymentMethod,
    PurchaseRecord,
};

use crate::config::MachineConfig;
use crate::error::{MachineError, MachineResult};

/// Result of a completed purchase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub record: PurchaseRecord,

    /// Units dispensed as change, in the order they left the safe.
    pub change: Vec<i64>,
}

impl PurchaseReceipt {
    pub fn change_amount(&self) -> Money {
        self.change.iter().copied().map(Money::from_units).sum()
    }
}

/// Read-only view of the machine for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSnapshot {
    pub id: String,
    pub safe_amount: Money,
    pub units: Vec<ChangeMoneyUnit>,
    pub inserted: Money,
    pub items: Vec<ItemForSale>,
    pub purchases: usize,
}

/// A rejected insertion, with the units handed back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRejected {
    pub error: MachineError,
    pub returned: Vec<i64>,
}

/// A single vending machine.
#[derive(Debug)]
pub struct VendingMachine {
    id: String,
    safe: ChangeSafe,
    storage: ItemStorage,
    purchases: Vec<PurchaseRecord>,
    escrow: Vec<i64>,
}

impl VendingMachine {
    /// Mounts a machine from its configuration.
    pub fn new(config: &MachineConfig) -> MachineResult<Self> {
        let safe = ChangeSafe::new(&config.denominations, &config.init.change_box.units)?;
        let storage = ItemStorage::new(&config.init.items);

        info!(
            id = %config.init.id,
            change = %safe.amount(),
            items = storage.items().len(),
            "Machine mounted"
        );

        Ok(VendingMachine {
            id: config.init.id.clone(),
            safe,
            storage,
            purchases: Vec::new(),
            escrow: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn safe(&self) -> &ChangeSafe {
        &self.safe
    }

    /// Direct access for restocking the safe (`set_change_count`).
    pub fn safe_mut(&mut self) -> &mut ChangeSafe {
        &mut self.safe
    }

    pub fn storage(&self) -> &ItemStorage {
        &self.storage
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    /// Units inserted for the current purchase, not yet in the safe.
    pub fn escrow(&self) -> &[i64] {
        &self.escrow
    }

    /// Credit available for the current purchase.
    pub fn inserted_amount(&self) -> Money {
        self.escrow.iter().copied().map(Money::from_units).sum()
    }

    /// Accepts one coin or note into escrow and returns the new credit.
    ///
    /// ## Errors
    /// `InvalidUnit` when the safe does not take `value`.
    pub fn insert_cash(&mut self, value: i64) -> MachineResult<Money> {
        if !self.safe.check_insertable(value) {
            return Err(CoreError::InvalidUnit { value }.into());
        }

        self.escrow.push(value);
        let credit = self.inserted_amount();
        info!(unit = value, %credit, "Cash inserted");
        Ok(credit)
    }

    /// Inserts `values` in order. On the first rejected unit, everything
    /// already escrowed is handed back along with the error.
    pub fn insert_all(&mut self, values: &[i64]) -> Result<Money, InsertRejected> {
        for &value in values {
            if let Err(error) = self.insert_cash(value) {
                let returned = self.cancel();
                return Err(InsertRejected { error, returned });
            }
        }
        Ok(self.inserted_amount())
    }

    /// Hands back everything in escrow.
    pub fn cancel(&mut self) -> Vec<i64> {
        let returned = std::mem::take(&mut self.escrow);
        if !returned.is_empty() {
            info!(units = returned.len(), "Escrow returned");
        }
        returned
    }

    /// Sells one unit of the item called `name`.
    pub fn purchase(&mut self, name: &str, method: PaymentMethod) -> MachineResult<PurchaseReceipt> {
        let item = self
            .storage
            .find(name)
            .cloned()
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;
        if !item.in_stock() {
            return Err(CoreError::OutOfStock {
                name: item.name,
                stock: item.stock,
            }
            .into());
        }

        let change = match method {
            PaymentMethod::Card => Vec::new(),
            PaymentMethod::Cash => self.settle_cash(item.sell_price)?,
        };

        self.storage.release(&item);
        let record = PurchaseRecord::new(item, method);
        info!(
            purchase_id = %record.purchase_id,
            item = %record.item.name,
            method = ?method,
            "Purchase completed"
        );
        self.purchases.push(record.clone());

        Ok(PurchaseReceipt { record, change })
    }

    /// Moves escrow into the safe and pays back the difference.
    ///
    /// On failure the safe is restored and escrow is kept.
    fn settle_cash(&mut self, price: Money) -> MachineResult<Vec<i64>> {
        let credit = self.inserted_amount();
        if credit < price {
            return Err(MachineError::insufficient_credit(credit, price));
        }

        let before = self.safe.clone();
        if let Err(err) = self.deposit_escrow() {
            self.safe = before;
            return Err(err.into());
        }

        let due = credit - price;
        let change = if due.is_positive() {
            match self.safe.do_change(due) {
                Ok(change) => change,
                Err(err) => {
                    self.safe = before;
                    return Err(err.into());
                }
            }
        } else {
            Vec::new()
        };

        self.escrow.clear();
        Ok(change)
    }

    fn deposit_escrow(&mut self) -> Result<(), CoreError> {
        for &value in &self.escrow {
            // Counts are capped well below i64::MAX; the cap rejects a full slot.
            let count = self.safe.get_change_count(value)?;
            self.safe.set_change_count(value, count.saturating_add(1))?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            id: self.id.clone(),
            safe_amount: self.safe.amount(),
            units: self.safe.units().to_vec(),
            inserted: self.inserted_amount(),
            items: self.storage.items().to_vec(),
            purchases: self.purchases.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vending_core::validation::MAX_UNIT_COUNT;
    use vending_core::{ChangeBox, MachineInit, VendingMachineItem};

    fn config(units: &[(i64, i64)]) -> MachineConfig {
        let mut config = MachineConfig::default();
        config.init = MachineInit {
            id: "vm-test".to_string(),
            change_box: ChangeBox {
                units: units
                    .iter()
                    .map(|&(value, count)| ChangeMoneyUnit::new(value, count))
                    .collect(),
            },
            items: vec![
                ItemForSale::new(
                    VendingMachineItem {
                        name: "Cola".to_string(),
                        image: "cola.png".to_string(),
                        price: Money::from_units(1100),
                    },
                    Money::from_units(1100),
                    2,
                ),
                ItemForSale::new(
                    VendingMachineItem {
                        name: "Gum".to_string(),
                        image: "gum.png".to_string(),
                        price: Money::from_units(500),
                    },
                    Money::from_units(500),
                    0,
                ),
            ],
        };
        config
    }

    #[test]
    fn test_insert_rejects_unknown_unit() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();

        assert_eq!(machine.insert_cash(1000).unwrap().units(), 1000);
        let err = machine.insert_cash(50).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUnit);
        assert_eq!(machine.escrow(), &[1000]);
    }

    #[test]
    fn test_insert_all_returns_escrow_on_reject() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();

        let rejected = machine.insert_all(&[1000, 500, 50, 100]).unwrap_err();

        assert_eq!(rejected.error.code, ErrorCode::InvalidUnit);
        assert_eq!(rejected.returned, vec![1000, 500]);
        assert!(machine.escrow().is_empty());
        assert!(machine.inserted_amount().is_zero());
    }

    #[test]
    fn test_insert_all_accumulates_credit() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();
        assert_eq!(machine.insert_all(&[1000, 100, 100]).unwrap().units(), 1200);
        assert_eq!(machine.escrow(), &[1000, 100, 100]);
    }

    #[test]
    fn test_cash_purchase_with_change() {
        let mut machine = VendingMachine::new(&config(&[(100, 5)])).unwrap();
        machine.insert_cash(1000).unwrap();
        machine.insert_cash(500).unwrap();

        let receipt = machine.purchase("Cola", PaymentMethod::Cash).unwrap();

        assert_eq!(receipt.change, vec![100, 100, 100, 100]);
        assert_eq!(receipt.change_amount().units(), 400);
        assert_eq!(machine.safe().get_change_count(100).unwrap(), 1);
        assert_eq!(machine.safe().get_change_count(500).unwrap(), 1);
        assert_eq!(machine.safe().get_change_count(1000).unwrap(), 1);
        assert_eq!(machine.storage().find("Cola").unwrap().stock, 1);
        assert!(machine.escrow().is_empty());
        assert_eq!(machine.purchases().len(), 1);
    }

    #[test]
    fn test_cash_purchase_exact_amount() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();
        for value in [1000, 100] {
            machine.insert_cash(value).unwrap();
        }

        let receipt = machine.purchase("Cola", PaymentMethod::Cash).unwrap();
        assert!(receipt.change.is_empty());
        assert_eq!(machine.safe().amount().units(), 1100);
    }

    #[test]
    fn test_cash_purchase_refused_when_change_impossible() {
        let mut machine = VendingMachine::new(&config(&[(100, 1)])).unwrap();
        machine.insert_cash(5000).unwrap();
        let before = machine.safe().clone();

        let err = machine.purchase("Cola", PaymentMethod::Cash).unwrap_err();

        assert_eq!(err.code, ErrorCode::ImpossibleChange);
        assert_eq!(machine.safe(), &before);
        assert_eq!(machine.escrow(), &[5000]);
        assert_eq!(machine.storage().find("Cola").unwrap().stock, 2);
        assert!(machine.purchases().is_empty());

        assert_eq!(machine.cancel(), vec![5000]);
        assert!(machine.inserted_amount().is_zero());
    }

    #[test]
    fn test_cash_purchase_insufficient_credit() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();
        machine.insert_cash(1000).unwrap();

        let err = machine.purchase("Cola", PaymentMethod::Cash).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientCredit);
        assert_eq!(machine.escrow(), &[1000]);
    }

    #[test]
    fn test_card_purchase_ignores_escrow() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();
        machine.insert_cash(500).unwrap();

        let receipt = machine.purchase("Cola", PaymentMethod::Card).unwrap();
        assert!(receipt.change.is_empty());
        assert_eq!(receipt.record.payment_method, PaymentMethod::Card);
        assert_eq!(machine.escrow(), &[500]);
        assert!(machine.safe().amount().is_zero());
    }

    #[test]
    fn test_purchase_unknown_and_sold_out() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();

        let err = machine.purchase("Juice", PaymentMethod::Card).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = machine.purchase("Gum", PaymentMethod::Card).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(machine.storage().find("Gum").unwrap().stock, 0);
    }

    #[test]
    fn test_restocked_safe_pays_change() {
        let mut machine = VendingMachine::new(&config(&[])).unwrap();
        machine.insert_cash(5000).unwrap();
        assert_eq!(
            machine.purchase("Cola", PaymentMethod::Cash).unwrap_err().code,
            ErrorCode::ImpossibleChange
        );

        machine.safe_mut().set_change_count(1000, 3).unwrap();
        machine.safe_mut().set_change_count(500, 2).unwrap();
        machine.safe_mut().set_change_count(100, 4).unwrap();

        let receipt = machine.purchase("Cola", PaymentMethod::Cash).unwrap();
        assert_eq!(receipt.change, vec![1000, 1000, 1000, 500, 100, 100, 100, 100]);
        assert_eq!(receipt.change_amount().units(), 3900);
        assert_eq!(machine.safe().get_change_count(5000).unwrap(), 1);
        assert_eq!(machine.safe().get_change_count(500).unwrap(), 1);
    }

    #[test]
    fn test_deposit_into_full_counter_is_refused() {
        let mut machine = VendingMachine::new(&config(&[(100, 5)])).unwrap();
        machine
            .safe_mut()
            .set_change_count(1000, MAX_UNIT_COUNT)
            .unwrap();
        machine.insert_cash(1000).unwrap();
        machine.insert_cash(500).unwrap();
        let before = machine.safe().clone();

        let err = machine.purchase("Cola", PaymentMethod::Cash).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(machine.safe(), &before);
        assert_eq!(machine.escrow(), &[1000, 500]);
        assert_eq!(machine.storage().find("Cola").unwrap().stock, 2);
    }

    #[test]
    fn test_snapshot() {
        let mut machine = VendingMachine::new(&config(&[(500, 2)])).unwrap();
        machine.insert_cash(100).unwrap();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.id, "vm-test");
        assert_eq!(snapshot.safe_amount.units(), 1000);
        assert_eq!(snapshot.inserted.units(), 100);
        assert_eq!(snapshot.units.len(), 5);
    }
}
