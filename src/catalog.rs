//! Product catalog, filters and pagination.
//!
//! The catalog itself never changes. Every filter or page change recomputes a
//! [`CatalogView`] from scratch.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Money, ProductId};
use crate::{Result, StorefrontError};

/// Products per storefront page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// The price slider tops out at the dearest product rounded up to this many reais.
pub const PRICE_STEP: u32 = 50;

/// Category filter value meaning "no restriction".
pub const ALL_CATEGORIES: &str = "all";

const SAMPLE_PRODUCTS: [(&str, &str, u64, &str, &str); 8] = [
    ("P001", "Sobretudo Clássico Tweed", 119_990, "Casacos", "https://images.unsplash.com/photo-1611312449412-6cefac5dc2b5?q=80&w=1887&auto=format&fit=crop"),
    ("P002", "Camisa de Linho Branca", 34_990, "Camisas", "https://images.unsplash.com/photo-1617058810260-03c0595d2f62?q=80&w=1887&auto=format&fit=crop"),
    ("P003", "Bota Chelsea de Couro", 78_990, "Calçados", "https://images.unsplash.com/photo-1603808033192-082d6919d3e1?q=80&w=1915&auto=format&fit=crop"),
    ("P004", "Blazer de Lã Cinza", 89_990, "Blazers", "https://images.unsplash.com/photo-1610384104075-e06bde473c2f?q=80&w=1887&auto=format&fit=crop"),
    ("P005", "Calça Chino Bege Slim", 29_990, "Calças", "https://images.unsplash.com/photo-1594541049182-0346f06f2b18?q=80&w=2070&auto=format&fit=crop"),
    ("P006", "Tênis Casual em Lona", 42_950, "Calçados", "https://images.unsplash.com/photo-1600269460596-f9463b723521?q=80&w=1974&auto=format&fit=crop"),
    ("P007", "Vestido Midi Plissado", 55_000, "Vestidos", "https://images.unsplash.com/photo-1548883733-5b82e22f2814?q=80&w=1887&auto=format&fit=crop"),
    ("P008", "Jaqueta Bomber em Couro", 98_000, "Casacos", "https://images.unsplash.com/photo-1596700877918-c2b6941d40a5?q=80&w=1935&auto=format&fit=crop"),
];

#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self { Self { products } }

    /// The storefront's fixed product list.
    pub fn sample() -> Self {
        let products = SAMPLE_PRODUCTS
            .iter()
            .filter_map(|(id, name, cents, category, image)| {
                let id = ProductId::new(*id).ok()?;
                Some(Product::new(id, *name, Money::from_cents(*cents), *category, *image))
            })
            .collect();
        Self { products }
    }

    pub fn products(&self) -> &[Product] { &self.products }

    pub fn find(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| *p.id() == *id)
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))
    }

    /// Distinct categories in ascending order, whatever order the products are in.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.products.iter().map(Product::category).collect::<BTreeSet<_>>().into_iter()
    }

    /// Upper bound of the price slider.
    pub fn price_ceiling(&self) -> Money {
        self.products.iter().map(Product::price).max().unwrap_or(Money::ZERO).ceil_to_multiple(PRICE_STEP)
    }

    /// Products passing both filters, in catalog order.
    ///
    /// Any criterion change must pass `reset_page = true`; moving between pages must not.
    pub fn apply_filters<'a>(&'a self, state: &mut FilterState, reset_page: bool) -> Vec<&'a Product> {
        if reset_page { state.page = 1; }
        self.products.iter().filter(|p| state.matches(p)).collect()
    }

    /// Computes the storefront grid for the current filters with the page clamped to what exists.
    pub fn view(&self, state: &mut FilterState, page_size: usize) -> CatalogView {
        let filtered = self.apply_filters(state, false);
        if filtered.is_empty() { return CatalogView::NoMatches; }

        let total_pages = total_pages(filtered.len(), page_size);
        state.page = state.page.clamp(1, total_pages);
        let page = paginate(&filtered, state.page, page_size);
        CatalogView::Products {
            cards: page.items.iter().map(|p| ProductCard::from(*p)).collect(),
            page: page.page,
            total_pages: page.total_pages,
            controls: PaginationControls::build(page.page, page.total_pages),
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    /// Reads a category select value, where `"all"` means no restriction.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES { Self::All } else { Self::Only(value.to_string()) }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self { Self::All => true, Self::Only(c) => c == category }
    }

    /// Options for the category select: "all" first, then each category.
    pub fn options(catalog: &Catalog) -> impl Iterator<Item = CategoryFilter> + '_ {
        std::iter::once(Self::All).chain(catalog.categories().map(|c| Self::Only(c.to_string())))
    }
}

impl Default for CategoryFilter {
    fn default() -> Self { Self::All }
}

/// Current storefront filters. `page` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    category: CategoryFilter,
    max_price: Money,
    page: usize,
}

impl FilterState {
    pub fn new(catalog: &Catalog) -> Self {
        Self { category: CategoryFilter::All, max_price: catalog.price_ceiling(), page: 1 }
    }

    pub fn category(&self) -> &CategoryFilter { &self.category }
    pub fn max_price(&self) -> Money { self.max_price }
    pub fn page(&self) -> usize { self.page }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category()) && product.price() <= self.max_price
    }

    pub fn reset(&mut self, catalog: &Catalog) { *self = Self::new(catalog); }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_max_price(&mut self, max_price: Money) {
        self.max_price = max_price;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages { self.page += 1; }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 { self.page -= 1; }
    }
}

// =============================================================================
// Pagination
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slice `[(page-1)*size, page*size)` of `filtered`, clamped to its bounds.
pub fn paginate<T>(filtered: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(filtered.len());
    let end = start.saturating_add(page_size).min(filtered.len());
    Page { items: &filtered[start..end], page, total_pages: total_pages(filtered.len(), page_size) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavControl {
    pub target: usize,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub number: usize,
    pub current: bool,
}

/// Previous, one button per page, next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub previous: NavControl,
    pub pages: Vec<PageControl>,
    pub next: NavControl,
}

impl PaginationControls {
    /// `None` when everything fits on one page.
    pub fn build(page: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 { return None; }
        Some(Self {
            previous: NavControl { target: page.saturating_sub(1).max(1), enabled: page > 1 },
            pages: (1..=total_pages).map(|number| PageControl { number, current: number == page }).collect(),
            next: NavControl { target: (page + 1).min(total_pages), enabled: page < total_pages },
        })
    }
}

// =============================================================================
// Views
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    /// Formatted for display.
    pub price: String,
    /// Plain decimal carried by the add-to-cart button.
    pub price_value: String,
    pub detail_href: String,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().to_string(),
            name: p.name().to_string(),
            category: p.category().to_string(),
            image: p.image().to_string(),
            price: p.price().display(),
            price_value: p.price().amount().to_string(),
            detail_href: p.detail_href(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CatalogView {
    /// Nothing passes the filters.
    NoMatches,
    Products {
        cards: Vec<ProductCard>,
        page: usize,
        total_pages: usize,
        controls: Option<PaginationControls>,
    },
}
