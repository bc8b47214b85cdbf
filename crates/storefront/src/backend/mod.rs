//! Hosted catalog backend client.
//!
//! The product and category lists live in a hosted backend that exposes its
//! tables over REST (PostgREST-style row endpoints with query-string
//! filters). This module wraps that API behind the narrow [`CatalogStore`]
//! trait and caches both reads per key using `moka` (5-minute TTL).

mod cache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use linden_core::{Category, Product};

use crate::config::CatalogApiConfig;
use cache::{CacheKey, CacheValue};

/// Errors that can occur when reading from the catalog backend.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Read-only access to the hosted catalog.
///
/// The storefront only ever reads two collections. Keeping the seam this
/// narrow lets tests drive the full page against an in-memory store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All active categories, ascending by sort order.
    async fn list_active_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// All products, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
}

// =============================================================================
// RestCatalogClient
// =============================================================================

/// Client for the hosted catalog REST API.
///
/// Both reads are cached for 5 minutes under their own key, so repeated page
/// loads (and every filter/sort/page change, which is purely derivation work)
/// do not hit the backend again.
#[derive(Clone)]
pub struct RestCatalogClient {
    inner: Arc<RestCatalogClientInner>,
}

struct RestCatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl RestCatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(RestCatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Fetch one table's rows with the given query-string filters.
    async fn fetch_rows<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{path}", self.inner.endpoint);
        let response = self
            .inner
            .client
            .get(&url)
            .query(query)
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog backend returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog backend response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[async_trait]
impl CatalogStore for RestCatalogClient {
    #[instrument(skip(self))]
    async fn list_active_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Categories served from cache");
            return Ok(categories);
        }

        let categories = self
            .fetch_rows::<Category>(
                "categories",
                &[
                    ("select", "*"),
                    ("is_active", "eq.true"),
                    ("order", "sort_order.asc"),
                ],
            )
            .await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Products served from cache");
            return Ok(products);
        }

        let products = self
            .fetch_rows::<Product>(
                "products",
                &[("select", "*"), ("order", "created_at.desc")],
            )
            .await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }
}
