//! # Domain Types
//!
//! Two layers of types: the wire schema the checkout host sends, and the
//! validated domain the resolver works on.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wire schema (serde, camelCase)        Validated domain                 │
//! │  ──────────────────────────────        ────────────────                 │
//! │  RunInput                                                               │
//! │  └── CartInput              ──────►    Cart { channel_value, lines }    │
//! │      ├── AttributeInput                                                 │
//! │      └── LineInput          ──────►    Line { id, quantity, ... }       │
//! │          ├── CostInput                                                  │
//! │          └── MerchandiseInput ────►    Merchandise { pricing, product } │
//! │              └── ProductInput ────►    Product { pricing fields }       │
//! │                                                                         │
//! │  Output:  PriceOperation { line_id, unit_price }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Conversion between the two lives in [`crate::validation`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::money::Money;

// =============================================================================
// Wire Schema
// =============================================================================

/// Root of the function input document.
#[derive(Debug, Clone, Deserialize)]
pub struct RunInput {
    pub cart: CartInput,
}

/// The cart as the checkout host sends it.
///
/// The attribution value arrives either as a single queried `attribute`
/// or inside a full `attributes` list; both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInput {
    #[serde(default)]
    pub attribute: Option<AttributeInput>,

    #[serde(default)]
    pub attributes: Vec<AttributeInput>,

    #[serde(default)]
    pub lines: Vec<LineInput>,
}

/// A cart attribute (key/value pair set by the storefront).
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeInput {
    /// Absent when the host resolved `attribute(key: ...)` for us.
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

/// A cart line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInput {
    pub id: String,

    pub quantity: i64,

    /// Current per-unit cost, if the host included it. A block that does not
    /// fit the schema reads as absent.
    #[serde(default, deserialize_with = "lenient")]
    pub cost: Option<CostInput>,

    #[serde(default)]
    pub merchandise: Option<MerchandiseInput>,
}

/// Deserializes an optional block, turning any shape mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Line cost block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInput {
    pub amount_per_quantity: MoneyInput,
}

/// A money value on the wire. The host sends decimals as strings, but
/// hand-written fixtures often use plain numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyInput {
    pub amount: DecimalInput,
}

/// Decimal amount in major units.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

impl DecimalInput {
    /// Converts to minor units, if the amount is representable exactly.
    pub fn to_money(&self) -> Option<Money> {
        match self {
            DecimalInput::Text(text) => Money::parse_decimal(text),
            DecimalInput::Number(number) => Money::parse_decimal(&number.to_string()),
        }
    }
}

/// The purchased variant.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchandiseInput {
    #[serde(default)]
    pub id: Option<String>,

    /// Variant-level pricing metafield.
    #[serde(default)]
    pub pricing: Option<Value>,

    #[serde(default)]
    pub product: Option<ProductInput>,
}

/// The variant's product.
///
/// Pricing fields are named per channel (`base_price_google`, ...), so every
/// key other than `id` is collected; non-metafield values are discarded
/// during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

// =============================================================================
// Validated Domain
// =============================================================================

/// A validated cart snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    /// Raw attribution value, if the cart carries one.
    pub channel_value: Option<String>,

    /// Lines in the order the host sent them. Ids are unique.
    pub lines: Vec<Line>,
}

/// A validated cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: String,

    /// Ordered quantity. Zero marks a line whose quantity was not positive;
    /// the resolver skips it.
    pub quantity: u64,

    /// Unit price the host currently charges, when known.
    pub current_unit_price: Option<Money>,

    pub merchandise: Option<Merchandise>,
}

/// A validated merchandise reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Merchandise {
    pub id: Option<String>,

    /// Variant-level pricing document (metafield payload), unparsed.
    pub pricing: Option<Value>,

    pub product: Option<Product>,
}

/// A validated product with its pricing fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    pub id: Option<String>,

    /// Metafield payloads by field name.
    pub fields: BTreeMap<String, Value>,
}

impl Product {
    /// Returns the payload of a pricing field.
    #[inline]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

// =============================================================================
// Price Operation
// =============================================================================

/// Fixes the unit price of one cart line.
///
/// Produced per invocation, never stored. At most one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceOperation {
    pub line_id: String,
    pub unit_price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_input() {
        let input: RunInput = serde_json::from_value(json!({
            "cart": {
                "attribute": { "key": "utm_source", "value": "google" },
                "lines": [{
                    "id": "gid://shopify/CartLine/1",
                    "quantity": 3,
                    "cost": { "amountPerQuantity": { "amount": "20.0" } },
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/1",
                        "pricing": { "value": "{\"base_price\": 1500}" },
                        "product": {
                            "id": "gid://shopify/Product/1",
                            "base_price": { "value": "2000" },
                            "title": "Espresso Beans"
                        }
                    }
                }]
            }
        }))
        .unwrap();

        let line = &input.cart.lines[0];
        assert_eq!(line.quantity, 3);
        let cost = line.cost.as_ref().unwrap();
        assert_eq!(cost.amount_per_quantity.amount.to_money(), Some(Money::from_cents(2000)));

        let product = line.merchandise.as_ref().unwrap().product.as_ref().unwrap();
        assert_eq!(product.id.as_deref(), Some("gid://shopify/Product/1"));
        assert!(product.fields.contains_key("base_price"));
        assert!(product.fields.contains_key("title"));
        assert!(!product.fields.contains_key("id"));
    }

    #[test]
    fn test_deserialize_minimal_input() {
        let input: RunInput = serde_json::from_value(json!({ "cart": {} })).unwrap();
        assert!(input.cart.attribute.is_none());
        assert!(input.cart.lines.is_empty());
    }

    #[test]
    fn test_numeric_amount() {
        let cost: CostInput =
            serde_json::from_value(json!({ "amountPerQuantity": { "amount": 12.5 } })).unwrap();
        assert_eq!(cost.amount_per_quantity.amount.to_money(), Some(Money::from_cents(1250)));
    }

    #[test]
    fn test_unreadable_cost_block_is_absent() {
        for cost in [
            json!(null),
            json!({ "amountPerQuantity": { "amount": null } }),
            json!({ "amountPerQuantity": { "amount": true } }),
            json!({ "currency": "EUR" }),
        ] {
            let line: LineInput =
                serde_json::from_value(json!({ "id": "a", "quantity": 1, "cost": cost })).unwrap();
            assert!(line.cost.is_none());
        }
    }

    #[test]
    fn test_line_requires_id_and_quantity() {
        let result = serde_json::from_value::<LineInput>(json!({ "quantity": 1 }));
        assert!(result.is_err());

        let result = serde_json::from_value::<LineInput>(json!({ "id": "a", "quantity": "two" }));
        assert!(result.is_err());
    }
}
