//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Product availability status.
///
/// Maps to the backend's `stock_status` column values. The backend owns the
/// set of values; anything this crate does not recognize decodes as
/// [`StockStatus::Unknown`] instead of failing the whole product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    /// Unrecognized backend value.
    #[default]
    #[serde(other)]
    Unknown,
}

impl StockStatus {
    /// Badge label shown on product cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::OutOfStock => "Out of stock",
            Self::Unknown => "Availability unknown",
        }
    }
}
