//! # Domain Types
//!
//! Records shared between the core, the orchestrator and the kiosk frontend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ VendingMachine  │   │  ItemForSale    │   │ PurchaseRecord  │       │
//! │  │     Item        │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  ─────────────  │   │  name, image    │   │  item snapshot  │       │
//! │  │  name           │   │  price          │   │  purchase_id    │       │
//! │  │  image          │   │  sell_price     │   │  payment_method │       │
//! │  │  price          │   │  stock          │   │  purchased_at   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ChangeMoneyUnit │   │   ChangeBox     │   │ PaymentMethod   │       │
//! │  │  value, count   │   │  units[]        │   │  Cash | Card    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records serialize in camelCase so the frontend sees the same shapes
//! it declares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Change Money Unit
// =============================================================================

/// One denomination counter: how many units of `value` the safe holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeMoneyUnit {
    /// Denomination value in won.
    pub value: i64,

    /// Units held.
    pub count: i64,
}

impl ChangeMoneyUnit {
    #[inline]
    pub const fn new(value: i64, count: i64) -> Self {
        ChangeMoneyUnit { value, count }
    }

    /// Value × count, saturating at the `i64` bounds.
    pub fn subtotal(&self) -> Money {
        let wide = self.value as i128 * self.count as i128;
        Money::from_units(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// The seed for a safe: the counters it starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangeBox {
    pub units: Vec<ChangeMoneyUnit>,
}

// =============================================================================
// Items
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VendingMachineItem {
    /// Display name; also the key storage matches on.
    pub name: String,

    /// Image reference for the kiosk.
    pub image: String,

    /// Catalog price.
    pub price: Money,
}

/// A catalog entry loaded into the machine, with its sale price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemForSale {
    pub name: String,
    pub image: String,
    pub price: Money,

    /// Price actually charged at this machine.
    pub sell_price: Money,

    /// Units left in the column.
    pub stock: i64,
}

impl ItemForSale {
    pub fn new(item: VendingMachineItem, sell_price: Money, stock: i64) -> Self {
        ItemForSale {
            name: item.name,
            image: item.image,
            price: item.price,
            sell_price,
            stock,
        }
    }

    #[inline]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Coins and notes inserted into the machine.
    Cash,
    /// Card reader; no change is involved.
    Card,
}

// =============================================================================
// Purchase Record
// =============================================================================

/// One completed purchase.
/// Uses snapshot pattern to freeze item data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseRecord {
    pub item: ItemForSale,
    pub purchase_id: String,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Records a purchase of `item` now, under a fresh UUID v4.
    pub fn new(item: ItemForSale, payment_method: PaymentMethod) -> Self {
        PurchaseRecord {
            item,
            purchase_id: Uuid::new_v4().to_string(),
            payment_method,
            purchased_at: Utc::now(),
        }
    }
}

// =============================================================================
// Machine Initialization
// =============================================================================

/// Everything a machine is mounted with.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MachineInit {
    pub id: String,
    pub change_box: ChangeBox,
    pub items: Vec<ItemForSale>,
}

// =============================================================================
// Unit Tests
// =============================================================================
