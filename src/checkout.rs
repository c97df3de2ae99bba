//! Checkout flow.
//!
//! The checkout page shows a summary of the cart, validates the customer form,
//! simulates a payment, and stores the finished order for the confirmation page.

use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use validator::{Validate, ValidationError};

use crate::domain::aggregates::{CustomerInfo, Order};
use crate::storage::Storage;
use crate::store::CartStore;
use crate::validation::{self, required_text};
use crate::view::{CartView, Destination, OrderView};
use crate::{Config, Result, StorefrontError, LAST_ORDER_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    Boleto,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub holder: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn is_complete(&self) -> bool {
        [&self.number, &self.holder, &self.expiry, &self.cvv].iter().all(|f| !f.trim().is_empty())
    }
}

/// The checkout form as submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Validate)]
#[validate(schema(function = "card_details_given", skip_on_field_errors = false))]
pub struct CheckoutForm {
    #[validate(custom = "required_text")]
    pub name: String,
    #[validate(email(message = "Por favor, insira um endereço de e-mail válido."))]
    pub email: String,
    #[validate(custom = "required_text")]
    pub address: String,
    #[validate(custom = "required_text")]
    pub phone: String,
    #[validate(custom = "required_text")]
    pub city: String,
    #[validate(custom = "required_text")]
    pub postal_code: String,
    #[validate(required(message = "Selecione um método de pagamento."))]
    pub payment_method: Option<PaymentMethod>,
    /// Only required when paying by credit card.
    pub card: Option<CardDetails>,
}

impl CheckoutForm {
    pub fn customer_info(&self) -> CustomerInfo {
        CustomerInfo {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }

    fn trimmed(mut self) -> Self {
        self.email = self.email.trim().to_string();
        self
    }
}

/// Card details are only required when paying by credit card. Reported under `__all__`.
fn card_details_given(form: &CheckoutForm) -> std::result::Result<(), ValidationError> {
    let complete = form.card.as_ref().is_some_and(CardDetails::is_complete);
    if form.payment_method == Some(PaymentMethod::CreditCard) && !complete {
        return Err(validation::error("card_required", "Preencha os dados do cartão de crédito."));
    }
    Ok(())
}

/// What the checkout page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutSummary {
    Items(CartView),
    /// Nothing to check out; leave for `redirect` once `after` has passed.
    EmptyCart { redirect: Destination, after: Duration },
}

/// The result of a successful checkout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: Order,
    pub next: Destination,
}

/// What the confirmation page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Order(OrderView),
    NoRecentOrder,
    Unreadable,
}

/// The "finish purchase" button in the cart panel.
pub fn begin<S: Storage>(store: &CartStore<S>) -> Result<Destination> {
    if store.is_empty() { return Err(StorefrontError::EmptyCart); }
    Ok(Destination::Checkout)
}

pub fn summary<S: Storage>(store: &CartStore<S>, config: &Config) -> CheckoutSummary {
    if store.is_empty() {
        return CheckoutSummary::EmptyCart { redirect: Destination::Storefront, after: config.empty_cart_redirect_delay };
    }
    CheckoutSummary::Items(store.view())
}

/// Sleeps through a delayed navigation, then says where to go.
pub async fn delayed(destination: Destination, after: Duration) -> Destination {
    tokio::time::sleep(after).await;
    destination
}

/// Validates the form, simulates the payment, records the order and empties the cart.
///
/// Nothing changes unless every step succeeds.
pub async fn place_order<S: Storage>(store: &mut CartStore<S>, form: CheckoutForm, config: &Config) -> Result<PlacedOrder> {
    let form = form.trimmed();
    form.validate()?;
    if store.is_empty() { return Err(StorefrontError::EmptyCart); }

    info!(items = store.item_count(), "processing payment");
    tokio::time::sleep(config.payment_delay).await;

    let order = Order::place(store.cart(), form.customer_info(), Local::now(), &mut rand::thread_rng())
        .map_err(|_| StorefrontError::EmptyCart)?;
    let json = serde_json::to_string(&order)?;
    store.storage_mut().set(LAST_ORDER_KEY, json)?;
    store.clear();

    info!(order_id = %order.id(), total = order.total(), "order placed");
    Ok(PlacedOrder { order, next: Destination::Confirmation })
}

/// Reads back the last order for the confirmation page.
pub fn confirmation<S: Storage>(storage: &S) -> Confirmation {
    let Some(raw) = storage.get(LAST_ORDER_KEY) else {
        warn!("no recent order found");
        return Confirmation::NoRecentOrder;
    };
    match serde_json::from_str::<Order>(&raw) {
        Ok(order) => Confirmation::Order(OrderView::from(&order)),
        Err(e) => {
            error!(error = %e, "failed to load order details");
            Confirmation::Unreadable
        }
    }
}
