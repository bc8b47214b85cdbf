//! Catalog derivation engines.
//!
//! Everything in this module is a pure function over an already-fetched
//! product list: derived price range, filtering, sorting, pagination, and the
//! pagination control window. The handlers re-run the whole chain on every
//! request; nothing here caches or mutates shared state.

use linden_core::{CategoryId, Product, StockStatus};
use rust_decimal::Decimal;

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 8;

/// Window of numbered pagination controls.
const CONTROL_WINDOW: u32 = 5;

// =============================================================================
// Derived price range
// =============================================================================

/// Price bounds used to seed the filter menu, rounded to whole hundreds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Range shown when no product carries a usable price.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::from(10_000),
        }
    }
}

/// Compute the display price range for the current product set.
///
/// Products whose price could not be coerced are excluded. The minimum is
/// floored and the maximum ceiled to the nearest multiple of 100, so the
/// filter inputs land on round numbers.
#[must_use]
pub fn price_range(products: &[Product]) -> PriceRange {
    let mut prices = products.iter().filter_map(|p| p.price);
    let Some(first) = prices.next() else {
        return PriceRange::fallback();
    };
    let (min, max) = prices.fold((first, first), |(lo, hi), price| {
        (lo.min(price), hi.max(price))
    });

    let hundred = Decimal::ONE_HUNDRED;
    PriceRange {
        min: (min / hundred).floor() * hundred,
        max: (max / hundred).ceil() * hundred,
    }
}

// =============================================================================
// Filter state
// =============================================================================

/// Stock/sale filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    InStock,
    OnSale,
}

impl AvailabilityFilter {
    /// Parse from a URL parameter value; unknown values mean no filter.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "in_stock" => Self::InStock,
            "on_sale" => Self::OnSale,
            _ => Self::All,
        }
    }

    /// Convert to a URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InStock => "in_stock",
            Self::OnSale => "on_sale",
        }
    }
}

/// Category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(CategoryId),
}

impl CategoryFilter {
    /// Parse from a URL parameter value; anything that is not a category
    /// UUID means no filter.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        s.parse::<CategoryId>().map_or(Self::All, Self::Id)
    }

    /// Convert to a URL parameter value.
    #[must_use]
    pub fn as_param(self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Id(id) => id.to_string(),
        }
    }
}

/// Catalog sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    /// Parse from a URL parameter value; unknown values sort by name.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price_low" => Self::PriceLow,
            "price_high" => Self::PriceHigh,
            _ => Self::Name,
        }
    }

    /// Convert to a URL parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
        }
    }
}

/// The catalog page's full filter state.
///
/// One value of this struct is decoded from the query string per request and
/// drives the whole derivation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub availability: AvailabilityFilter,
    pub sort: SortKey,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            availability: AvailabilityFilter::All,
            sort: SortKey::Name,
            min_price: None,
            max_price: None,
            page: 1,
        }
    }
}

// =============================================================================
// Filter + sort
// =============================================================================

/// Filter and sort the product list for the given query.
#[must_use]
pub fn apply(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let term = query.search.trim().to_lowercase();
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| matches(product, query, &term))
        .cloned()
        .collect();
    sort(&mut matched, query.sort);
    matched
}

/// Per-product filter predicate.
///
/// Checks run in precedence order: search, category, availability, price
/// bounds. An active `in_stock`/`on_sale` filter decides the product outright
/// and the price bounds are never consulted for it; bounds only apply on the
/// `All` branch. That short-circuit is long-standing storefront behavior and
/// is kept as-is.
fn matches(product: &Product, query: &CatalogQuery, lowered_term: &str) -> bool {
    if !lowered_term.is_empty() && !product.name.to_lowercase().contains(lowered_term) {
        return false;
    }

    if let CategoryFilter::Id(wanted) = query.category
        && product.category_id != Some(wanted)
    {
        return false;
    }

    match query.availability {
        AvailabilityFilter::InStock => return product.stock_status == StockStatus::InStock,
        AvailabilityFilter::OnSale => return product.on_sale(),
        AvailabilityFilter::All => {}
    }

    if let Some(min) = query.min_price
        && product.effective_price() < min
    {
        return false;
    }
    if let Some(max) = query.max_price
        && product.effective_price() > max
    {
        return false;
    }

    true
}

/// Sort products in place. `sort_by` is stable, so ties keep their
/// pre-sort order; there is no secondary key.
pub fn sort(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::PriceLow => {
            products.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
        }
        SortKey::PriceHigh => {
            products.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
        }
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Slice one page out of the filtered list.
///
/// Returns the page contents and the total page count (`ceil(len / 8)`). An
/// out-of-range page yields an empty slice; the engine deliberately does not
/// clamp the page number, the controls disable navigation at the boundaries
/// instead.
#[must_use]
pub fn paginate<T>(items: &[T], page: u32) -> (&[T], u32) {
    let total_pages = u32::try_from(items.len().div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX);
    let start = page.saturating_sub(1) as usize * PAGE_SIZE;
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    let slice = items.get(start..end).unwrap_or_default();
    (slice, total_pages)
}

/// One entry in the pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// The rendered pagination strip: numbered window plus prev/next targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageControls {
    /// Target of the previous-page control; `None` disables it.
    pub prev: Option<u32>,
    /// Target of the next-page control; `None` disables it.
    pub next: Option<u32>,
    pub items: Vec<PageItem>,
}

/// Build the pagination strip for the given position.
///
/// At most five numbered controls, windowed around the current page. When
/// the window does not reach a boundary, a jump-to-first/last control is
/// added with an ellipsis marking the gap. A single page needs no controls.
#[must_use]
pub fn page_controls(current: u32, total: u32) -> Option<PageControls> {
    if total <= 1 {
        return None;
    }

    let end = current
        .saturating_sub(CONTROL_WINDOW / 2)
        .max(1)
        .saturating_add(CONTROL_WINDOW - 1)
        .min(total);
    let start = end.saturating_sub(CONTROL_WINDOW - 1).max(1);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    for number in start..=end {
        items.push(PageItem::Page {
            number,
            current: number == current,
        });
    }
    if end < total {
        if end + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            number: total,
            current: false,
        });
    }

    Some(PageControls {
        prev: (current > 1).then(|| current - 1),
        next: (current < total).then(|| current + 1),
        items,
    })
}
