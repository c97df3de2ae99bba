//! Domain events
use crate::domain::value_objects::ProductId;

/// Raised by every cart mutation so the presentation layer knows what to refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { product_id: ProductId, quantity: u32 },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    ItemRemoved { product_id: ProductId },
    Cleared,
}

impl CartEvent {
    /// Adding to the cart slides the cart panel open.
    pub fn opens_cart_panel(&self) -> bool { matches!(self, Self::ItemAdded { .. }) }

    /// Quantity edits and removals can happen from the checkout page as well.
    pub fn refreshes_checkout_summary(&self) -> bool {
        matches!(self, Self::QuantityChanged { .. } | Self::ItemRemoved { .. } | Self::Cleared)
    }
}
