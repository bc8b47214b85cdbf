//! End-to-end tests for the catalog page.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use tower::ServiceExt;

use linden_core::StockStatus;
use linden_integration_tests::{TestCatalog, category, product, test_app};

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sample_catalog() -> TestCatalog {
    TestCatalog {
        categories: vec![category("Home Fragrance", 1), category("Kitchen", 2)],
        products: vec![
            product("Cedar Candle", "24.50"),
            product("Crown Jewel Diffuser", "48.00"),
            product("Maple Rolling Pin", "32.00"),
        ],
        ..TestCatalog::default()
    }
}

#[tokio::test]
async fn catalog_page_lists_products_and_categories() {
    let (status, body) = get(test_app(sample_catalog()), "/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cedar Candle"));
    assert!(body.contains("Crown Jewel Diffuser"));
    assert!(body.contains("Maple Rolling Pin"));
    assert!(body.contains("Home Fragrance"));
    assert!(body.contains("Kitchen"));
}

#[tokio::test]
async fn search_filters_case_insensitively() {
    let (status, body) = get(test_app(sample_catalog()), "/catalog?search=crown").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Crown Jewel Diffuser"));
    assert!(!body.contains("Cedar Candle"));
    assert!(!body.contains("Maple Rolling Pin"));
}

#[tokio::test]
async fn in_stock_filter_overrides_price_bounds() {
    let mut catalog = sample_catalog();
    for p in &mut catalog.products {
        p.stock_status = if p.name.starts_with("Cedar") {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        };
    }

    // The min bound would reject the cheap candle, but the availability
    // filter decides products outright.
    let (status, body) = get(
        test_app(catalog),
        "/catalog?availability=in_stock&price_min=100",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cedar Candle"));
    assert!(!body.contains("Crown Jewel Diffuser"));
}

#[tokio::test]
async fn on_sale_filter_shows_discounted_products_only() {
    let mut catalog = sample_catalog();
    if let Some(first) = catalog.products.first_mut() {
        first.discount_percent = Decimal::from(20);
    }

    let (status, body) = get(test_app(catalog), "/catalog?availability=on_sale").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cedar Candle"));
    assert!(body.contains("Sale"));
    assert!(!body.contains("Maple Rolling Pin"));
}

#[tokio::test]
async fn seventeen_products_paginate_across_three_pages() {
    let products = (1..=17)
        .map(|n| product(&format!("Item {n:02}"), "10.00"))
        .collect();
    let catalog = TestCatalog {
        products,
        ..TestCatalog::default()
    };

    let app = test_app(catalog);

    let (_, first_page) = get(app.clone(), "/catalog").await;
    assert!(first_page.contains("Item 01"));
    assert!(first_page.contains("Item 08"));
    assert!(!first_page.contains("Item 09"));

    let (_, last_page) = get(app, "/catalog?page=3").await;
    assert!(last_page.contains("Item 17"));
    assert!(!last_page.contains("Item 01"));
    // Three numbered controls, next disabled at the boundary.
    assert!(last_page.contains("/catalog?page=2"));
    assert!(last_page.contains("page-next disabled"));
}

#[tokio::test]
async fn single_page_renders_no_pagination_controls() {
    let (_, body) = get(test_app(sample_catalog()), "/catalog").await;
    assert!(!body.contains("page-number"));
}

#[tokio::test]
async fn failed_product_read_renders_empty_state() {
    let catalog = TestCatalog {
        fail_products: true,
        ..TestCatalog::default()
    };

    let (status, body) = get(test_app(catalog), "/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products to show"));
}

#[tokio::test]
async fn failed_category_read_still_renders_products() {
    let mut catalog = sample_catalog();
    catalog.fail_categories = true;

    let (status, body) = get(test_app(catalog), "/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Cedar Candle"));
    assert!(!body.contains("Home Fragrance"));
}

#[tokio::test]
async fn root_redirects_to_catalog() {
    let response = test_app(sample_catalog())
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "/catalog"
    );
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, body) = get(test_app(sample_catalog()), "/checkout").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("/checkout"));
}

#[tokio::test]
async fn health_endpoints_reflect_backend_state() {
    let (status, body) = get(test_app(sample_catalog()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = get(test_app(sample_catalog()), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);

    let catalog = TestCatalog {
        fail_categories: true,
        ..TestCatalog::default()
    };
    let (status, _) = get(test_app(catalog), "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
