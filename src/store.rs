//! Cart store.
//!
//! Owns the [`Cart`] for the lifetime of a page and writes a fresh snapshot to
//! storage after every mutation. Reading the snapshot back is forgiving: a
//! missing or corrupt value gives an empty cart, never an error.

use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::domain::aggregates::{Cart, CartLine, Product};
use crate::domain::events::CartEvent;
use crate::domain::value_objects::{Money, ProductId, Quantity};
use crate::storage::Storage;
use crate::view::CartView;
use crate::{Result, StorefrontError, CART_KEY};

/// Largest quantity the product detail page lets a shopper add at once.
pub const MAX_ADD_QUANTITY: u32 = 10;

pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    item_count: u32,
}

/// Shape of a persisted line before it is checked. Quantity is read as a signed
/// integer so a zero or negative count drops that line, not the whole snapshot.
#[derive(Deserialize)]
struct StoredLine {
    id: String,
    name: String,
    price: Money,
    quantity: i64,
}

impl StoredLine {
    fn into_line(self) -> Option<CartLine> {
        let id = ProductId::new(self.id).ok()?;
        let price = Money::new(self.price.amount()).ok()?;
        let quantity = u32::try_from(self.quantity).ok().and_then(|q| Quantity::new(q).ok())?;
        Some(CartLine { id, name: self.name, price, quantity })
    }
}

impl<S: Storage> CartStore<S> {
    /// Rehydrates the cart from `storage`.
    pub fn load(storage: S) -> Self {
        let cart = read_cart(&storage);
        let item_count = cart.item_count();
        Self { storage, cart, item_count }
    }

    /// Discards in-memory state and reads the snapshot again.
    pub fn reload(&mut self) {
        self.cart = read_cart(&self.storage);
        self.item_count = self.cart.item_count();
    }

    /// Writes the current cart and returns the refreshed item count.
    ///
    /// A failed write is logged and otherwise ignored: the in-memory cart stays
    /// authoritative until the next successful persist.
    pub fn persist(&mut self) -> u32 {
        match serde_json::to_string(self.cart.lines()) {
            Ok(json) => {
                if let Err(e) = self.storage.set(CART_KEY, json) {
                    warn!(error = %e, "failed to persist cart");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cart"),
        }
        self.item_count = self.cart.item_count();
        self.item_count
    }

    pub fn add_item(&mut self, id: ProductId, name: impl Into<String>, price: Money) {
        debug!(product_id = %id, "add to cart");
        self.cart.add_item(id, name, price);
        self.persist();
    }

    pub fn add(&mut self, request: AddToCartRequest) {
        self.add_item(request.id, request.name, request.price);
    }

    /// Adds `quantity` units of `product`, as the product detail page does.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if !(1..=MAX_ADD_QUANTITY).contains(&quantity) {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        for _ in 0..quantity {
            self.cart.add_item(product.id().clone(), product.name(), product.price());
        }
        self.persist();
        Ok(())
    }

    /// Changes a line's quantity by `delta`. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        if !self.cart.update_quantity(id, delta) {
            debug!(product_id = id, "quantity change for unknown line ignored");
            return;
        }
        self.persist();
    }

    pub fn remove_item(&mut self, id: &str) {
        self.cart.remove_item(id);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    pub fn compute_total(&self) -> Money { self.cart.total() }
    pub fn item_count(&self) -> u32 { self.item_count }
    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn is_empty(&self) -> bool { self.cart.is_empty() }
    pub fn take_events(&mut self) -> Vec<CartEvent> { self.cart.take_events() }
    pub fn view(&self) -> CartView { CartView::from(&self.cart) }

    pub fn storage(&self) -> &S { &self.storage }
    pub fn storage_mut(&mut self) -> &mut S { &mut self.storage }
    pub fn into_storage(self) -> S { self.storage }
}

fn read_cart<S: Storage>(storage: &S) -> Cart {
    let Some(raw) = storage.get(CART_KEY) else { return Cart::new(); };
    match serde_json::from_str::<Vec<StoredLine>>(&raw) {
        Ok(stored) => {
            let total = stored.len();
            let lines: Vec<CartLine> = stored.into_iter().filter_map(StoredLine::into_line).collect();
            if lines.len() != total {
                warn!(dropped = total - lines.len(), "dropped invalid lines from stored cart");
            }
            Cart::from_lines(lines)
        }
        Err(e) => {
            error!(error = %e, "failed to load cart from storage, starting empty");
            Cart::new()
        }
    }
}

/// An "add to cart" click, checked before it reaches the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddToCartRequest {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

impl AddToCartRequest {
    /// Parses the raw attributes carried by an add-to-cart button.
    pub fn parse(id: Option<&str>, name: Option<&str>, price: Option<&str>) -> Result<Self> {
        let (Some(id), Some(name), Some(price)) = (id, name, price) else {
            error!("add-to-cart button without data attributes");
            return Err(StorefrontError::InvalidAddToCart("missing attributes".into()));
        };
        let id = ProductId::new(id).map_err(|e| StorefrontError::InvalidAddToCart(e.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(StorefrontError::InvalidAddToCart("empty name".into()));
        }
        let price = Money::parse(price).map_err(|e| StorefrontError::InvalidAddToCart(e.to_string()))?;
        Ok(Self { id, name: name.to_string(), price })
    }
}

impl From<&Product> for AddToCartRequest {
    fn from(product: &Product) -> Self {
        Self { id: product.id().clone(), name: product.name().to_string(), price: product.price() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::{FileStorage, MemoryStorage};
    use proptest::prelude::*;

    fn id(s: &str) -> ProductId { ProductId::new(s).unwrap() }

    #[test]
    fn test_add_twice_merges() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("P001"), "Sobretudo", Money::from_cents(119990));
        store.add_item(id("P001"), "Sobretudo", Money::from_cents(119990));
        assert_eq!(store.cart().lines().len(), 1);
        assert_eq!(store.cart().lines()[0].quantity.value(), 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_decrease_to_zero_removes() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("A"), "A", Money::from_cents(100));
        store.add_item(id("A"), "A", Money::from_cents(100));
        store.update_quantity("A", -2);
        assert!(store.is_empty());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.storage().get(CART_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.update_quantity("nope", 1);
        assert!(store.storage().get(CART_KEY).is_none());
        store.remove_item("nope");
        assert_eq!(store.storage().get(CART_KEY).as_deref(), Some("[]"));
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_compute_total() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("A"), "A", Money::from_cents(1000));
        store.add_item(id("A"), "A", Money::from_cents(1000));
        store.add_item(id("B"), "B", Money::from_cents(550));
        assert_eq!(store.compute_total(), Money::from_cents(2550));
    }

    #[test]
    fn test_persist_load_round_trip() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("A"), "Camisa", Money::from_cents(34990));
        store.add_item(id("B"), "Bota", Money::from_cents(78990));
        store.update_quantity("B", 2);
        let lines = store.cart().lines().to_vec();

        let fresh = CartStore::load(store.into_storage());
        assert_eq!(fresh.cart().lines(), lines.as_slice());
        assert_eq!(fresh.item_count(), 4);
    }

    #[test]
    fn test_corrupt_storage_yields_empty_cart() {
        for raw in ["not json", "{\"id\":1}", "[{\"id\":\"A\"}]", "[{\"id\":\"A\",\"name\":\"A\",\"price\":\"1\",\"quantity\":\"two\"}]"] {
            let store = CartStore::load(MemoryStorage::new().with_entry(CART_KEY, raw));
            assert!(store.is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_load_normalizes_snapshot() {
        let raw = r#"[
            {"id":"A","name":"A","price":"10.00","quantity":1},
            {"id":"B","name":"B","price":"5.50","quantity":0},
            {"id":"A","name":"A","price":"10.00","quantity":2},
            {"id":"C","name":"C","price":10.5,"quantity":1}
        ]"#;
        let store = CartStore::load(MemoryStorage::new().with_entry(CART_KEY, raw));
        let lines = store.cart().lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity.value(), 3);
        assert_eq!(lines[1].price, Money::from_cents(1050));
    }

    #[test]
    fn test_negative_quantity_drops_only_that_line() {
        let raw = r#"[
            {"id":"A","name":"A","price":"10.00","quantity":3},
            {"id":"B","name":"B","price":"5.50","quantity":-1}
        ]"#;
        let store = CartStore::load(MemoryStorage::new().with_entry(CART_KEY, raw));
        assert_eq!(store.cart().lines().len(), 1);
        assert_eq!(store.cart().lines()[0].id.as_str(), "A");
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_reload_picks_up_new_snapshot() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("A"), "A", Money::from_cents(100));
        assert_eq!(store.item_count(), 1);

        let raw = r#"[{"id":"B","name":"Bota","price":"789.90","quantity":4}]"#;
        store.storage_mut().set(CART_KEY, raw.to_string()).unwrap();
        assert_eq!(store.item_count(), 1);

        store.reload();
        assert!(store.cart().line("A").is_none());
        assert_eq!(store.cart().line("B").unwrap().quantity.value(), 4);
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn test_events_drive_panel_and_summary() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(id("A"), "A", Money::from_cents(100));
        store.update_quantity("A", 1);
        let events = store.take_events();
        assert!(events[0].opens_cart_panel());
        assert!(events[1].refreshes_checkout_summary());
    }

    #[test]
    fn test_add_quantity_from_detail_page() {
        let catalog = Catalog::sample();
        let product = catalog.find("P003").unwrap();
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_quantity(product, 3).unwrap();
        assert_eq!(store.item_count(), 3);
        assert!(matches!(store.add_quantity(product, 0), Err(StorefrontError::InvalidQuantity(0))));
        assert!(matches!(store.add_quantity(product, 11), Err(StorefrontError::InvalidQuantity(11))));
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_add_to_cart_request() {
        let req = AddToCartRequest::parse(Some("P006"), Some("Tênis Casual em Lona"), Some("429.5")).unwrap();
        assert_eq!(req.price, Money::from_cents(42950));
        assert!(AddToCartRequest::parse(Some("P006"), None, Some("1")).is_err());
        assert!(AddToCartRequest::parse(Some(" "), Some("x"), Some("1")).is_err());
        assert!(AddToCartRequest::parse(Some("P006"), Some("x"), Some("grátis")).is_err());

        let mut store = CartStore::load(MemoryStorage::new());
        store.add(req);
        assert_eq!(store.cart().lines()[0].name, "Tênis Casual em Lona");
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().expect("failed to create tmpdir");
        {
            let mut store = CartStore::load(FileStorage::open(dir.path()).unwrap());
            store.add_item(id("A"), "A", Money::from_cents(100));
        }
        let store = CartStore::load(FileStorage::open(dir.path()).unwrap());
        assert_eq!(store.item_count(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(&'static str),
        Update(&'static str, i64),
        Remove(&'static str),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        let key = prop::sample::select(vec!["P001", "P002", "P003"]);
        prop_oneof![
            key.clone().prop_map(Op::Add),
            (key.clone(), -3i64..=3).prop_map(|(k, d)| Op::Update(k, d)),
            key.prop_map(Op::Remove),
        ]
    }

    fn apply(store: &mut CartStore<MemoryStorage>, op: &Op) {
        match op {
            Op::Add(k) => store.add_item(id(k), *k, Money::from_cents(1990)),
            Op::Update(k, delta) => store.update_quantity(k, *delta),
            Op::Remove(k) => store.remove_item(k),
        }
    }

    fn check_invariant(store: &CartStore<MemoryStorage>) -> std::result::Result<(), TestCaseError> {
        let mut seen = std::collections::HashSet::new();
        for line in store.cart().lines() {
            prop_assert!(line.quantity.value() >= 1);
            prop_assert!(seen.insert(line.id.clone()), "duplicate line {}", line.id);
        }
        prop_assert_eq!(store.item_count(), store.cart().item_count());
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_lines_stay_unique_and_positive(ops in prop::collection::vec(arb_op(), 0..50)) {
            let mut store = CartStore::load(MemoryStorage::new());
            for op in &ops {
                apply(&mut store, op);
                check_invariant(&store)?;
            }
        }

        #[test]
        fn prop_reload_reproduces_lines(ops in prop::collection::vec(arb_op(), 1..50)) {
            let mut store = CartStore::load(MemoryStorage::new());
            for op in &ops {
                apply(&mut store, op);
                let fresh = CartStore::load(store.storage().clone());
                prop_assert_eq!(fresh.cart().lines(), store.cart().lines());
                prop_assert_eq!(fresh.item_count(), store.item_count());
            }
        }
    }
}
