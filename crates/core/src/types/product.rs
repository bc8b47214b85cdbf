//! Product entity as served by the hosted catalog backend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{CategoryId, ProductId};
use super::status::StockStatus;

/// A catalog product.
///
/// The backend stores prices loosely: older rows hold the price as a string,
/// newer rows as a JSON number, and a handful of rows are simply broken.
/// Decoding coerces all of those into `Option<Decimal>` so that one bad row
/// never takes down the whole listing; `None` means the price could not be
/// coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Coerced price. `None` when the stored value is missing or invalid.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    /// Percentage markdown; zero means no active sale.
    #[serde(default, deserialize_with = "lenient_percent")]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Whether the product can be paid for on delivery.
    #[serde(default)]
    pub cash_on_delivery: Option<bool>,
}

impl Product {
    /// The price used for filtering, sorting, and display.
    ///
    /// Products without a coercible price count as zero here; they are still
    /// excluded from derived price-range computation.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.price.unwrap_or_default()
    }

    /// Whether the product has an active markdown.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.discount_percent > Decimal::ZERO
    }

    /// The marked-down price, rounded to cents. `None` when not on sale.
    #[must_use]
    pub fn sale_price(&self) -> Option<Decimal> {
        if !self.on_sale() {
            return None;
        }
        let factor = (Decimal::ONE_HUNDRED - self.discount_percent) / Decimal::ONE_HUNDRED;
        Some((self.effective_price() * factor).round_dp(2))
    }
}

/// Coerce a raw JSON value into a non-negative decimal.
fn coerce_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().and_then(Decimal::from_f64),
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.map(|d| d.max(Decimal::ZERO))
}

/// Deserialize a number-or-string field as `Option<Decimal>`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_decimal))
}

/// Deserialize a number-or-string field as `Decimal`, defaulting to zero.
fn lenient_percent<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_decimal).unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Product {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_price_decodes_from_string() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "24.50",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.price, Some(Decimal::new(2450, 2)));
    }

    #[test]
    fn test_price_decodes_from_number() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": 24.5,
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.price, Some(Decimal::new(245, 1)));
    }

    #[test]
    fn test_invalid_price_decodes_as_none() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "not a price",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.price, None);
        assert_eq!(product.effective_price(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_price_decodes_as_none() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.price, None);
    }

    #[test]
    fn test_negative_price_coerces_to_zero() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "-3.00",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.price, Some(Decimal::ZERO));
    }

    #[test]
    fn test_discount_defaults_to_zero() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "24.50",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.discount_percent, Decimal::ZERO);
        assert!(!product.on_sale());
        assert_eq!(product.sale_price(), None);
    }

    #[test]
    fn test_sale_price_applies_discount() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "80.00",
                "discount_percent": 25,
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert!(product.on_sale());
        assert_eq!(product.sale_price(), Some(Decimal::new(6000, 2)));
    }

    #[test]
    fn test_unknown_stock_status_is_tolerated() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "24.50",
                "stock_status": "backordered",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.stock_status, StockStatus::Unknown);
    }

    #[test]
    fn test_optional_fields_default() {
        let product = decode(
            r#"{
                "id": "8f6f4b3e-9a0f-4c9f-8d55-6f2c1f1f3b01",
                "name": "Cedar Candle",
                "price": "24.50",
                "created_at": "2026-01-04T10:00:00Z"
            }"#,
        );
        assert_eq!(product.category_id, None);
        assert_eq!(product.image_url, None);
        assert_eq!(product.cash_on_delivery, None);
        assert_eq!(product.stock_status, StockStatus::Unknown);
    }
}
