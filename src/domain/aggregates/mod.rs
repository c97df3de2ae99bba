//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::Product;
pub use order::{Order, OrderError, OrderId, CustomerInfo};
pub use cart::{Cart, CartLine};
