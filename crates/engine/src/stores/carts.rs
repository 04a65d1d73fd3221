//! Per-user cart storage.

use dashmap::DashMap;

use clockwork_domain::{Cart, CartEntry, UserId};

/// Carts keyed by owner. Each cart is mutated only by actions
/// authenticated as its owner; the transport guarantees that, the store
/// just keeps the sequences apart.
pub struct CartStore {
    carts: DashMap<UserId, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Append an entry to the user's cart, creating the cart on first use.
    pub fn add(&self, user_id: &UserId, entry: CartEntry) {
        self.carts.entry(user_id.clone()).or_default().add(entry);
    }

    /// A copy of the user's current entries, in insertion order.
    pub fn entries(&self, user_id: &UserId) -> Vec<CartEntry> {
        self.carts
            .get(user_id)
            .map(|cart| cart.entries().to_vec())
            .unwrap_or_default()
    }

    /// Replace the user's cart with a fresh empty one.
    pub fn clear(&self, user_id: &UserId) {
        self.carts.remove(user_id);
    }

    /// Take the user's entries, leaving the cart empty. Empty when the
    /// user never had a cart.
    pub fn take(&self, user_id: &UserId) -> Vec<CartEntry> {
        self.carts
            .remove(user_id)
            .map(|(_, mut cart)| cart.take_entries())
            .unwrap_or_default()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
