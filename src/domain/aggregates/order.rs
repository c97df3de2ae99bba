//! Order Aggregate
//!
//! An order is written once when checkout completes and read back once by the
//! confirmation page.

use chrono::{DateTime, Datelike, TimeZone};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::domain::aggregates::cart::{Cart, CartLine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    date: String,
    items: Vec<CartLine>,
    total: String,
    #[serde(rename = "customerInfo")]
    customer_info: CustomerInfo,
}

/// Order number in the form `AU-2026-4821`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate<R: Rng>(year: i32, rng: &mut R) -> Self {
        Self(format!("AU-{}-{}", year, rng.gen_range(1000..=9999)))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub postal_code: String,
}

impl Order {
    /// Snapshots the cart. The total is stored already formatted, exactly as it was shown.
    pub fn place<Tz, R>(cart: &Cart, customer_info: CustomerInfo, placed_at: DateTime<Tz>, rng: &mut R) -> Result<Self, OrderError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
        R: Rng,
    {
        if cart.is_empty() { return Err(OrderError::NoItems); }
        Ok(Self {
            id: OrderId::generate(placed_at.year(), rng),
            date: placed_at.format("%d/%m/%Y").to_string(),
            items: cart.lines().to_vec(),
            total: cart.total().display(),
            customer_info,
        })
    }

    pub fn id(&self) -> &OrderId { &self.id }
    pub fn date(&self) -> &str { &self.date }
    pub fn items(&self) -> &[CartLine] { &self.items }
    pub fn total(&self) -> &str { &self.total }
    pub fn customer_info(&self) -> &CustomerInfo { &self.customer_info }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum OrderError { NoItems }
impl std::error::Error for OrderError {}
impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "No items") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Money, ProductId};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_order_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("P002").unwrap(), "Camisa de Linho Branca", Money::from_cents(34990));
        cart.add_item(ProductId::new("P002").unwrap(), "Camisa de Linho Branca", Money::from_cents(34990));
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let order = Order::place(&cart, CustomerInfo { name: "Ana".into(), ..Default::default() }, at, &mut rng).unwrap();

        assert!(order.id().as_str().starts_with("AU-2026-"));
        let digits: u32 = order.id().as_str()["AU-2026-".len()..].parse().unwrap();
        assert!((1000..=9999).contains(&digits));
        assert_eq!(order.date(), "07/03/2026");
        assert_eq!(order.total(), "R$ 699,80");
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Order::place(&Cart::new(), CustomerInfo::default(), Utc::now(), &mut rng).unwrap_err();
        assert_eq!(err, OrderError::NoItems);
    }

    #[test]
    fn test_snapshot_shape() {
        let mut cart = Cart::new();
        cart.add_item(ProductId::new("P1").unwrap(), "X", Money::from_cents(100));
        let mut rng = StdRng::seed_from_u64(3);
        let order = Order::place(&cart, CustomerInfo::default(), Utc::now(), &mut rng).unwrap();
        let json: serde_json::Value = serde_json::to_value(&order).unwrap();
        assert!(json.get("customerInfo").unwrap().get("postal_code").is_some());
        assert_eq!(json["items"][0]["quantity"], 1);
    }
}
