//! Catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use linden_core::{Category, Product, StockStatus};

use crate::catalog::{
    self, AvailabilityFilter, CatalogQuery, CategoryFilter, PageControls, PageItem, SortKey,
};
use crate::filters;
use crate::state::AppState;

/// Deserialize empty strings as None for optional numeric fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Catalog page query parameters.
///
/// This is the whole filter state of the page. The search form writes only
/// `search`, so a fresh search arrives with every other field at its default;
/// the filter form and the pagination links carry the full state through.
#[derive(Debug, Deserialize)]
pub struct CatalogPageQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub sort: String,
    /// Min price filter (dollars)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_min: Option<f64>,
    /// Max price filter (dollars)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_max: Option<f64>,
    pub page: Option<u32>,
}

impl CatalogPageQuery {
    /// Resolve the raw parameters into typed filter state.
    ///
    /// Unknown enum values fall back to their defaults; price bounds clamp to
    /// non-negative; a missing page means page 1.
    fn into_query(self) -> CatalogQuery {
        let coerce = |raw: Option<f64>| {
            raw.and_then(Decimal::from_f64)
                .map(|bound| bound.max(Decimal::ZERO))
        };
        CatalogQuery {
            search: self.search,
            category: CategoryFilter::parse(&self.category),
            availability: AvailabilityFilter::parse(&self.availability),
            sort: SortKey::parse(&self.sort),
            min_price: coerce(self.price_min),
            max_price: coerce(self.price_max),
            page: self.page.unwrap_or(1).max(1),
        }
    }
}

// =============================================================================
// View types
// =============================================================================

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub in_stock: bool,
    pub stock_label: &'static str,
    pub cash_on_delivery: bool,
    /// Index of the card within the current page.
    pub position: usize,
}

impl ProductCardView {
    fn from_product(product: &Product, position: usize) -> Self {
        Self {
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            price: product.effective_price(),
            sale_price: product.sale_price(),
            in_stock: product.stock_status == StockStatus::InStock,
            stock_label: product.stock_status.label(),
            cash_on_delivery: product.cash_on_delivery.unwrap_or(false),
            position,
        }
    }
}

/// Category option for the filter menu.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub value: String,
    pub name: String,
    pub selected: bool,
}

impl CategoryOptionView {
    fn from_category(category: &Category, active: CategoryFilter) -> Self {
        Self {
            value: category.id.to_string(),
            name: category.name.clone(),
            selected: active == CategoryFilter::Id(category.id),
        }
    }
}

/// One entry of the rendered pagination strip.
#[derive(Clone)]
pub struct PageLinkView {
    pub ellipsis: bool,
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Pagination strip with resolved hrefs.
pub struct PaginationView {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub items: Vec<PageLinkView>,
}

impl PaginationView {
    fn build(controls: &PageControls, query: &CatalogQuery) -> Self {
        let items = controls
            .items
            .iter()
            .map(|item| match *item {
                PageItem::Page { number, current } => PageLinkView {
                    ellipsis: false,
                    number,
                    href: page_href(query, number),
                    current,
                },
                PageItem::Ellipsis => PageLinkView {
                    ellipsis: true,
                    number: 0,
                    href: String::new(),
                    current: false,
                },
            })
            .collect();

        Self {
            prev: controls.prev.map(|page| page_href(query, page)),
            next: controls.next.map(|page| page_href(query, page)),
            items,
        }
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub search: String,
    pub categories: Vec<CategoryOptionView>,
    pub availability: &'static str,
    pub sort: &'static str,
    pub min_price: String,
    pub max_price: String,
    pub price_floor: Decimal,
    pub price_ceiling: Decimal,
    pub products: Vec<ProductCardView>,
    pub total_results: usize,
    pub current_page: u32,
    pub pagination: Option<PaginationView>,
    pub clear_search_href: String,
}

// =============================================================================
// URL building
// =============================================================================

/// Build a catalog URL carrying the full filter state, pointed at `page`.
///
/// Default values are omitted, so a pristine state produces a parameter-free
/// URL and a bare search submission yields `search` as the sole parameter.
fn page_href(query: &CatalogQuery, page: u32) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if !query.search.is_empty() {
        params.push(("search", query.search.clone()));
    }
    if query.category != CategoryFilter::All {
        params.push(("category", query.category.as_param()));
    }
    if query.availability != AvailabilityFilter::All {
        params.push(("availability", query.availability.as_str().to_string()));
    }
    if query.sort != SortKey::Name {
        params.push(("sort", query.sort.as_str().to_string()));
    }
    if let Some(min) = query.min_price {
        params.push(("price_min", min.to_string()));
    }
    if let Some(max) = query.max_price {
        params.push(("price_max", max.to_string()));
    }
    if page > 1 {
        params.push(("page", page.to_string()));
    }

    if params.is_empty() {
        return "/catalog".to_string();
    }

    let encoded: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    format!("/catalog?{}", encoded.join("&"))
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the catalog page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CatalogPageQuery>,
) -> Response {
    let query = params.into_query();

    // The two reads are independent; neither blocks the other.
    let (categories, products) = tokio::join!(
        state.catalog().list_active_categories(),
        state.catalog().list_products()
    );

    // A missing category list only degrades the filter menu.
    let categories = categories.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch categories: {e}");
        Vec::new()
    });

    // A missing product list falls into the empty-state branch.
    let products = products.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch products: {e}");
        Vec::new()
    });

    let range = catalog::price_range(&products);
    let filtered = catalog::apply(&products, &query);
    let total_results = filtered.len();
    let (page_products, total_pages) = catalog::paginate(&filtered, query.page);

    let cards = page_products
        .iter()
        .enumerate()
        .map(|(position, product)| ProductCardView::from_product(product, position))
        .collect();

    let pagination = catalog::page_controls(query.page, total_pages)
        .map(|controls| PaginationView::build(&controls, &query));

    CatalogTemplate {
        search: query.search.clone(),
        categories: categories
            .iter()
            .map(|category| CategoryOptionView::from_category(category, query.category))
            .collect(),
        availability: query.availability.as_str(),
        sort: query.sort.as_str(),
        min_price: query.min_price.map(|d| d.to_string()).unwrap_or_default(),
        max_price: query.max_price.map(|d| d.to_string()).unwrap_or_default(),
        price_floor: range.min,
        price_ceiling: range.max,
        products: cards,
        total_results,
        current_page: query.page,
        pagination,
        clear_search_href: page_href(&CatalogQuery::default(), 1),
    }
    .into_response()
}
