//! Cart Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::events::CartEvent;
use crate::domain::value_objects::{Money, ProductId, Quantity};

/// Ordered cart lines, at most one per product, in order of first addition.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    events: Vec<CartEvent>,
}

/// One product in the cart. Name and price are copied when the line is created
/// and never follow later catalog changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self { id, name: name.into(), price, quantity: Quantity::ONE }
    }
    pub fn line_total(&self) -> Money { self.price.multiply(self.quantity.value()) }
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    /// Rebuilds a cart from possibly untidy lines, merging repeated ids into the first occurrence.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => existing.quantity = existing.quantity.add(line.quantity),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] { &self.lines }
    pub fn line(&self, id: &str) -> Option<&CartLine> { self.position(id).map(|pos| &self.lines[pos]) }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Sum of quantities, as shown on the cart icon.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().fold(0u32, |acc, l| acc.saturating_add(l.quantity.value()))
    }

    pub fn total(&self) -> Money { self.lines.iter().map(CartLine::line_total).sum() }

    pub fn add_item(&mut self, id: ProductId, name: impl Into<String>, price: Money) {
        let quantity = if let Some(existing) = self.lines.iter_mut().find(|l| l.id == id) {
            existing.quantity = existing.quantity.increment();
            existing.quantity
        } else {
            self.lines.push(CartLine::new(id.clone(), name, price));
            Quantity::ONE
        };
        self.raise_event(CartEvent::ItemAdded { product_id: id, quantity: quantity.value() });
    }

    /// Returns `false` when no line has this id.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> bool {
        let Some(pos) = self.position(id) else { return false; };
        let line = &mut self.lines[pos];
        let product_id = line.id.clone();
        match line.quantity.apply_delta(delta) {
            Some(quantity) => {
                line.quantity = quantity;
                self.raise_event(CartEvent::QuantityChanged { product_id, quantity: quantity.value() });
            }
            None => {
                self.lines.remove(pos);
                self.raise_event(CartEvent::ItemRemoved { product_id });
            }
        }
        true
    }

    /// Returns `false` when there was nothing to remove.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(pos) = self.position(id) else { return false; };
        let line = self.lines.remove(pos);
        self.raise_event(CartEvent::ItemRemoved { product_id: line.id });
        true
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.raise_event(CartEvent::Cleared);
    }

    pub fn take_events(&mut self) -> Vec<CartEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: CartEvent) { self.events.push(e); }

    /// Ids are matched the way [`ProductId::new`] stores them, without surrounding whitespace.
    fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.lines.iter().position(|l| l.id == *id)
    }
}
