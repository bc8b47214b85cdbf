//! Integration tests for Linden.
//!
//! The catalog page is exercised end-to-end through the real router with an
//! in-memory [`CatalogStore`], so no hosted backend is needed. Tests drive
//! requests with `tower::ServiceExt::oneshot` and assert on the rendered
//! HTML.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use uuid::Uuid;

use linden_core::{Category, CategoryId, Product, ProductId, StockStatus};
use linden_storefront::backend::{CatalogError, CatalogStore};
use linden_storefront::config::{CatalogApiConfig, StorefrontConfig};
use linden_storefront::routes;
use linden_storefront::state::AppState;

/// In-memory catalog store for driving the storefront in tests.
#[derive(Default)]
pub struct TestCatalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub fail_categories: bool,
    pub fail_products: bool,
}

#[async_trait]
impl CatalogStore for TestCatalog {
    async fn list_active_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if self.fail_categories {
            return Err(CatalogError::Status {
                status: 500,
                body: "category read failed".to_string(),
            });
        }
        Ok(self.categories.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if self.fail_products {
            return Err(CatalogError::Status {
                status: 500,
                body: "product read failed".to_string(),
            });
        }
        Ok(self.products.clone())
    }
}

/// Configuration for tests; never touches the environment.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        catalog: CatalogApiConfig {
            endpoint: "http://localhost:9/rest/v1".to_string(),
            api_key: SecretString::from("fT4!vQ8#wL2$yH6&"),
        },
        sentry_dsn: None,
    }
}

/// Build the full storefront router over the given in-memory catalog.
#[must_use]
pub fn test_app(catalog: TestCatalog) -> Router {
    let state = AppState::with_store(test_config(), Arc::new(catalog));
    Router::new().merge(routes::routes()).with_state(state)
}

/// Fixture product with sensible defaults.
#[must_use]
pub fn product(name: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(Uuid::new_v4()),
        name: name.to_string(),
        price: price.parse().ok(),
        discount_percent: Decimal::ZERO,
        stock_status: StockStatus::InStock,
        category_id: None,
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 4, 10, 0, 0).single().unwrap_or_default(),
        cash_on_delivery: None,
    }
}

/// Fixture category.
#[must_use]
pub fn category(name: &str, sort_order: i32) -> Category {
    Category {
        id: CategoryId::new(Uuid::new_v4()),
        name: name.to_string(),
        is_active: true,
        sort_order,
    }
}
