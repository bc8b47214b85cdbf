//! Category entity as served by the hosted catalog backend.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A product category.
///
/// The storefront only ever fetches active categories, ordered ascending by
/// `sort_order`; inactive categories are invisible to this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Ascending display order within the filter menu.
    #[serde(default)]
    pub sort_order: i32,
}

const fn default_active() -> bool {
    true
}
