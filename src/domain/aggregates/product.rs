//! Product Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{Money, ProductId};

/// A catalog entry. Products are created once at startup and never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    category: String,
    image: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, category: impl Into<String>, image: impl Into<String>) -> Self {
        Self { id, name: name.into(), price, category: category.into(), image: image.into() }
    }

    pub fn id(&self) -> &ProductId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> Money { self.price }
    pub fn category(&self) -> &str { &self.category }
    pub fn image(&self) -> &str { &self.image }

    /// Link target for the product detail page.
    pub fn detail_href(&self) -> String { format!("product-detail.html?id={}", self.id) }
}
