//! # Item Storage
//!
//! The columns of items the machine sells.
//!
//! Storage is plain record keeping: it is seeded once, and [`ItemStorage::release`]
//! takes one unit off an item's stock. It knows nothing about money; the
//! orchestrator pairs it with the change safe for each purchase.

use crate::types::ItemForSale;

/// Items for sale and their stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStorage {
    items: Vec<ItemForSale>,
}

impl ItemStorage {
    /// Creates storage holding its own copy of `items`.
    pub fn new(items: &[ItemForSale]) -> Self {
        ItemStorage {
            items: items.to_vec(),
        }
    }

    pub fn items(&self) -> &[ItemForSale] {
        &self.items
    }

    /// Looks an item up by name.
    pub fn find(&self, name: &str) -> Option<&ItemForSale> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Whether an item with this name exists and has stock left.
    pub fn is_available(&self, name: &str) -> bool {
        self.find(name).is_some_and(ItemForSale::in_stock)
    }

    /// Takes one unit off every item whose name matches `item`.
    ///
    /// Stock is not checked here and goes negative if released past zero;
    /// callers check [`is_available`](Self::is_available) first.
    pub fn release(&mut self, item: &ItemForSale) {
        for stored in self.items.iter_mut().filter(|stored| stored.name == item.name) {
            stored.stock -= 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::VendingMachineItem;

    fn item(name: &str, stock: i64) -> ItemForSale {
        ItemForSale::new(
            VendingMachineItem {
                name: name.to_string(),
                image: format!("{}.png", name.to_lowercase()),
                price: Money::from_units(1000),
            },
            Money::from_units(1200),
            stock,
        )
    }

    #[test]
    fn test_new_copies_seed() {
        let mut seed = vec![item("Cola", 2)];
        let storage = ItemStorage::new(&seed);
        seed[0].stock = 99;

        assert_eq!(storage.find("Cola").unwrap().stock, 2);
    }

    #[test]
    fn test_release_matches_by_name() {
        let mut storage = ItemStorage::new(&[item("Cola", 2), item("Water", 5)]);

        // A stale snapshot still releases the stored item.
        let snapshot = item("Cola", 100);
        storage.release(&snapshot);

        assert_eq!(storage.find("Cola").unwrap().stock, 1);
        assert_eq!(storage.find("Water").unwrap().stock, 5);
    }

    #[test]
    fn test_release_unknown_is_noop() {
        let mut storage = ItemStorage::new(&[item("Cola", 2)]);
        storage.release(&item("Juice", 1));
        assert_eq!(storage.items(), &[item("Cola", 2)]);
    }

    #[test]
    fn test_release_past_zero_goes_negative() {
        let mut storage = ItemStorage::new(&[item("Cola", 0)]);
        assert!(!storage.is_available("Cola"));

        storage.release(&item("Cola", 0));
        assert_eq!(storage.find("Cola").unwrap().stock, -1);
    }

    #[test]
    fn test_is_available() {
        let storage = ItemStorage::new(&[item("Cola", 1), item("Water", 0)]);
        assert!(storage.is_available("Cola"));
        assert!(!storage.is_available("Water"));
        assert!(!storage.is_available("Juice"));
    }
}
