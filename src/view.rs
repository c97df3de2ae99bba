//! Display-ready view models.
//!
//! Plain data describing what a page should show. Turning them into markup is
//! the presentation layer's job.

use serde::Serialize;

use crate::domain::aggregates::{Cart, CartLine, Order};

/// Where the page should go next. The core only decides the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Storefront,
    Checkout,
    Confirmation,
}

impl Destination {
    pub fn page(&self) -> &'static str {
        match self {
            Self::Storefront => "index.html",
            Self::Checkout => "checkout.html",
            Self::Confirmation => "order-success.html",
        }
    }
}

/// One cart line, with every amount already formatted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub subtotal: String,
}

/// The cart panel (and the checkout summary, which shows the same data).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn empty() -> Self {
        Self { lines: Vec::new(), total: crate::Money::ZERO.display(), item_count: 0 }
    }

    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity.value(),
            unit_price: line.price.display(),
            subtotal: line.line_total().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        if cart.is_empty() { return Self::empty(); }
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
        }
    }
}

/// The order confirmation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderView {
    /// Shown with a leading `#`.
    pub number: String,
    pub date: String,
    pub total: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub customer_city: String,
    pub customer_postal_code: String,
    pub lines: Vec<CartLineView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let customer = order.customer_info();
        Self {
            number: format!("#{}", order.id()),
            date: order.date().to_string(),
            total: order.total().to_string(),
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
            customer_address: customer.address.clone(),
            customer_city: customer.city.clone(),
            customer_postal_code: customer.postal_code.clone(),
            lines: order.items().iter().map(CartLineView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Money, ProductId};

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty());
        assert_eq!(view.total, "R$ 0,00");
    }

    #[test]
    fn test_cart_view_formats_lines() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("P006").unwrap(), "Tênis Casual em Lona", Money::from_cents(42950));
        cart.add_item(ProductId::new("P006").unwrap(), "Tênis Casual em Lona", Money::from_cents(42950));
        let view = CartView::from(&cart);
        assert_eq!(view.lines[0].unit_price, "R$ 429,50");
        assert_eq!(view.lines[0].subtotal, "R$ 859,00");
        assert_eq!(view.total, "R$ 859,00");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_destination_pages() {
        assert_eq!(Destination::Confirmation.page(), "order-success.html");
    }
}
