//! Pure cart and aggregation arithmetic.
//!
//! The cart is an ordered sequence of lines keyed by item id, at most one
//! line per id. It lives only in the storefront's memory: it is never
//! persisted and is destroyed on reload, explicit removal, or successful
//! order submission. Totals and counts are recomputed on every call, never
//! cached.

use crate::models::{CartItem, FoodItem, OrderItem, Review};

/// In-memory shopping cart.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    entries: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`: increments the existing line if the id is
    /// already present, otherwise appends a new line with quantity 1.
    pub fn add(&mut self, item: FoodItem) {
        match self.entries.iter_mut().find(|e| e.item.id == item.id) {
            Some(entry) => entry.cart_quantity += 1,
            None => self.entries.push(CartItem {
                item,
                cart_quantity: 1,
            }),
        }
    }

    /// Removes the line with the given id. No-op if absent.
    pub fn remove(&mut self, item_id: u64) {
        self.entries.retain(|e| e.item.id != item_id);
    }

    /// Adjusts a line's quantity by `delta`, clamped so it never drops
    /// below 1. Removal is the only way to reach zero. No-op if the id is
    /// absent.
    pub fn update_quantity(&mut self, item_id: u64, delta: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.item.id == item_id) {
            let new_quantity = i64::from(entry.cart_quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX));
            entry.cart_quantity = new_quantity as u32;
        }
    }

    /// Sum of price x quantity over all lines.
    pub fn total(&self) -> i64 {
        self.entries
            .iter()
            .map(|e| e.item.price * i64::from(e.cart_quantity))
            .sum()
    }

    /// Sum of quantities over all lines.
    pub fn count(&self) -> u32 {
        self.entries.iter().map(|e| e.cart_quantity).sum()
    }

    pub fn entries(&self) -> &[CartItem] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshots the cart lines as order items, decoupled from the live
    /// catalog records.
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.entries
            .iter()
            .map(|e| OrderItem {
                name: e.item.name.clone(),
                price: e.item.price,
                quantity: e.cart_quantity,
            })
            .collect()
    }
}

/// Arithmetic mean of the ratings rounded to one decimal, or 0 for an empty
/// list. Always recomputed from the embedded sequence, never stored.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}
