//! Per-user shopping carts.
//!
//! A cart is an order-preserving sequence of (item name, quality) picks,
//! owned by exactly one user. Entries hold already-resolved catalog display
//! names; submission converts them 1:1 into a request's confirmed bucket
//! with no re-resolution.

use serde::{Deserialize, Serialize};

use crate::quality::Quality;

/// One cart line: a resolved item name plus the requested quality tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item_name: String,
    pub quality: Quality,
}

impl CartEntry {
    pub fn new(item_name: impl Into<String>, quality: Quality) -> Self {
        Self {
            item_name: item_name.into(),
            quality,
        }
    }
}

/// An ordered sequence of cart entries. Duplicates are permitted; the bank
/// really will send two of the same sword if asked twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unconditionally. Identical entries are not merged.
    pub fn add(&mut self, entry: CartEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Consume the cart's entries, leaving it empty.
    pub fn take_entries(&mut self) -> Vec<CartEntry> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_duplicates() {
        let mut cart = Cart::new();
        cart.add(CartEntry::new("Sword of Flame", Quality::Raw));
        cart.add(CartEntry::new("Boots of Speed", Quality::Enchanted));
        cart.add(CartEntry::new("Sword of Flame", Quality::Raw));

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.entries()[0].item_name, "Sword of Flame");
        assert_eq!(cart.entries()[2].item_name, "Sword of Flame");
    }

    #[test]
    fn take_entries_leaves_cart_empty() {
        let mut cart = Cart::new();
        cart.add(CartEntry::new("Sword of Flame", Quality::Raw));

        let taken = cart.take_entries();
        assert_eq!(taken.len(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add(CartEntry::new("Sword of Flame", Quality::Legendary));
        cart.clear();
        assert!(cart.is_empty());
    }
}
