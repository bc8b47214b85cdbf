//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{CatalogStore, RestCatalogClient};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the catalog store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Create the production application state backed by the hosted catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Arc::new(RestCatalogClient::new(&config.catalog));
        Self::with_store(config, catalog)
    }

    /// Create an application state with an explicit catalog store.
    ///
    /// Tests inject an in-memory store here; production goes through
    /// [`AppState::new`].
    #[must_use]
    pub fn with_store(config: StorefrontConfig, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }
}
