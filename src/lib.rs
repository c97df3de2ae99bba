//! Aura Urbana storefront core
//!
//! Client-side logic for a small clothing storefront with no backend.
//!
//! ## Features
//! - Static product catalog with category/price filters and pagination
//! - Shopping cart persisted through a key-value storage adapter
//! - Checkout with form validation and simulated payment
//! - Order confirmation read back from storage
//! - Contact form validation
//!
//! Everything here computes view models; putting them on screen is left to the caller.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod domain;
pub mod storage;
pub mod store;
mod validation;
pub mod view;

use thiserror::Error;

pub use catalog::{Catalog, CatalogView, CategoryFilter, FilterState, PaginationControls};
pub use config::Config;
pub use domain::aggregates::{Cart, CartLine, CustomerInfo, Order, Product};
pub use domain::events::CartEvent;
pub use domain::value_objects::{Money, ProductId, Quantity};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{AddToCartRequest, CartStore};
pub use view::{CartView, Destination};

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the serialized cart lines.
pub const CART_KEY: &str = "auraUrbanaCart";

/// Key holding the most recently completed order.
pub const LAST_ORDER_KEY: &str = "auraUrbanaLastOrder";

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid add-to-cart request: {0}")]
    InvalidAddToCart(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
