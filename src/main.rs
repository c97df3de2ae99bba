//! Aura Urbana - headless storefront session
//!
//! Drives the library the way the page scripts do: browse, filter, fill the
//! cart, check out and read back the confirmation.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aura_urbana::checkout::{self, CheckoutForm, CheckoutSummary, Confirmation, PaymentMethod};
use aura_urbana::{AddToCartRequest, CartStore, Catalog, CatalogView, CategoryFilter, Config, FileStorage, FilterState, Money};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let storage = FileStorage::open(config.storage_dir.clone())?;
    let catalog = Catalog::sample();
    let mut store = CartStore::load(storage);
    info!(dir = %config.storage_dir.display(), items = store.item_count(), "storefront ready");

    let mut filters = FilterState::new(&catalog);
    log_catalog(&catalog.view(&mut filters, config.page_size));

    filters.set_category(CategoryFilter::parse("Calçados"));
    filters.set_max_price(Money::from_cents(50_000));
    log_catalog(&catalog.view(&mut filters, config.page_size));
    filters.reset(&catalog);

    let request = AddToCartRequest::parse(Some("P002"), Some("Camisa de Linho Branca"), Some("349.90"))?;
    store.add(request);
    store.add_quantity(catalog.find("P006")?, 2)?;
    for event in store.take_events() {
        info!(?event, open_panel = event.opens_cart_panel(), "cart event");
    }
    store.update_quantity("P006", -1);

    let destination = checkout::begin(&store)?;
    info!(page = destination.page(), "navigating");

    if let CheckoutSummary::Items(view) = checkout::summary(&store, &config) {
        for line in &view.lines {
            info!(name = %line.name, quantity = line.quantity, subtotal = %line.subtotal, "summary line");
        }
        info!(total = %view.total, "checkout summary");
    }

    let form = CheckoutForm {
        name: "Ana Souza".into(),
        email: "ana@example.com".into(),
        address: "Rua das Flores, 12".into(),
        phone: "11 99999-0000".into(),
        city: "São Paulo".into(),
        postal_code: "01000-000".into(),
        payment_method: Some(PaymentMethod::Pix),
        card: None,
    };
    let placed = checkout::place_order(&mut store, form, &config).await?;
    info!(page = placed.next.page(), "navigating");

    match checkout::confirmation(store.storage()) {
        Confirmation::Order(order) => info!(number = %order.number, date = %order.date, total = %order.total, "order confirmed"),
        Confirmation::NoRecentOrder => warn!("confirmation page found no order"),
        Confirmation::Unreadable => warn!("confirmation page could not read the order"),
    }

    Ok(())
}

fn log_catalog(view: &CatalogView) {
    match view {
        CatalogView::NoMatches => info!("no products match the current filters"),
        CatalogView::Products { cards, page, total_pages, controls } => {
            let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
            let buttons = controls.as_ref().map_or(0, |c| c.pages.len());
            info!(?ids, page, total_pages, buttons, "catalog page");
        }
    }
}
