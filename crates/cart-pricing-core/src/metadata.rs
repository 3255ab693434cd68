//! # Pricing Metadata
//!
//! Lenient readers for the pricing metafields attached to products and
//! variants.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field                 Payload examples                                 │
//! │  ─────                 ────────────────                                 │
//! │  base price            1500 · 1500.0 · "1500" · {"value": "1500"}       │
//! │  tier table            {"10": 1300} · "{\"10\": 1300}"                  │
//! │  variant pricing       {"base_price_google": 1400,                      │
//! │                         "tiered_price_google": {"10": 1200}}            │
//! │                                                                         │
//! │  Anything that does not fit parses to None and the resolver moves on   │
//! │  to the next source. Malformed metadata is never an error.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Metafields arrive wrapped (`{"value": "<text>"}` or `{"jsonValue": ...}`);
//! [`unwrap_metafield`] strips that envelope.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::money::Money;

// =============================================================================
// Metafield Envelope
// =============================================================================

/// Returns the payload of a metafield, or `None` for null/unknown shapes.
///
/// `{"jsonValue": x}` yields `x`; `{"value": "text"}` yields the text as a
/// JSON string; a bare string or number is already a payload.
pub fn unwrap_metafield(raw: &Value) -> Option<Value> {
    match raw {
        Value::Object(map) => {
            if let Some(json) = map.get("jsonValue").filter(|v| !v.is_null()) {
                return Some(json.clone());
            }
            match map.get("value") {
                Some(Value::String(text)) => Some(Value::String(text.clone())),
                _ => None,
            }
        }
        Value::String(_) | Value::Number(_) => Some(raw.clone()),
        _ => None,
    }
}

// =============================================================================
// Base Price
// =============================================================================

/// Reads a unit price in minor units.
///
/// ## Rules
/// - Positive integers, or floats with no fractional part
/// - Strings holding one of those (metafield text)
/// - Zero is an unset placeholder and reads as `None`
///
/// ## Example
/// ```rust
/// use cart_pricing_core::metadata::parse_price;
/// use cart_pricing_core::money::Money;
/// use serde_json::json;
///
/// assert_eq!(parse_price(&json!(1500)), Some(Money::from_cents(1500)));
/// assert_eq!(parse_price(&json!("1500")), Some(Money::from_cents(1500)));
/// assert_eq!(parse_price(&json!(15.5)), None);
/// assert_eq!(parse_price(&json!("0")), None);
/// assert_eq!(parse_price(&json!("abc")), None);
/// ```
pub fn parse_price(payload: &Value) -> Option<Money> {
    minor_units(payload).filter(|price| price.cents() > 0)
}

fn minor_units(payload: &Value) -> Option<Money> {
    match payload {
        Value::Number(number) => {
            if let Some(cents) = number.as_u64() {
                return i64::try_from(cents).ok().map(Money::from_cents);
            }
            let value = number.as_f64()?;
            if value >= 0.0 && value.fract() == 0.0 && value <= i64::MAX as f64 {
                Some(Money::from_cents(value as i64))
            } else {
                None
            }
        }
        Value::String(text) => match serde_json::from_str::<Value>(text.trim()) {
            Ok(inner @ Value::Number(_)) => minor_units(&inner),
            _ => None,
        },
        _ => None,
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// Quantity-break prices: minimum quantity → unit price.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TierTable(BTreeMap<u64, Money>);

impl TierTable {
    /// Returns the tier for `quantity`: the largest threshold ≤ quantity.
    ///
    /// ## Example
    /// ```text
    /// table: {5: 1400, 10: 1300, 50: 1100}
    ///
    ///   qty 3   → None (base price stands)
    ///   qty 5   → (5, 1400)
    ///   qty 49  → (10, 1300)
    ///   qty 500 → (50, 1100)
    /// ```
    pub fn price_for(&self, quantity: u64) -> Option<(u64, Money)> {
        self.0
            .range(..=quantity)
            .next_back()
            .map(|(threshold, price)| (*threshold, *price))
    }

    /// True when the table has no tiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u64, Money)> for TierTable {
    fn from_iter<I: IntoIterator<Item = (u64, Money)>>(iter: I) -> Self {
        TierTable(iter.into_iter().collect())
    }
}

/// Reads a tier table.
///
/// Accepts an object or a string holding an object. Entries whose key is not
/// a non-negative integer, or whose price fails [`parse_price`], are dropped.
/// A table left empty is `None`.
pub fn parse_tier_table(payload: &Value) -> Option<TierTable> {
    match payload {
        Value::Object(entries) => {
            let table: TierTable = entries
                .iter()
                .filter_map(|(threshold, price)| {
                    let threshold = threshold.trim().parse::<u64>().ok()?;
                    Some((threshold, parse_price(price)?))
                })
                .collect();
            (!table.is_empty()).then_some(table)
        }
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner @ Value::Object(_)) => parse_tier_table(&inner),
            _ => None,
        },
        _ => None,
    }
}

// =============================================================================
// Variant Pricing
// =============================================================================

/// Variant-level pricing document, keyed by channel-qualified field names.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPricing(Map<String, Value>);

impl VariantPricing {
    /// Parses the variant pricing payload.
    ///
    /// Must be a non-empty JSON object (or a string holding one); anything
    /// else means the variant has no pricing of its own.
    pub fn parse(payload: &Value) -> Option<Self> {
        match payload {
            Value::Object(map) if !map.is_empty() => Some(VariantPricing(map.clone())),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) if !map.is_empty() => Some(VariantPricing(map)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Raw entry for a field key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(entries: &[(u64, i64)]) -> TierTable {
        entries
            .iter()
            .map(|(q, p)| (*q, Money::from_cents(*p)))
            .collect()
    }

    #[test]
    fn test_unwrap_metafield() {
        assert_eq!(unwrap_metafield(&json!({ "value": "1500" })), Some(json!("1500")));
        assert_eq!(
            unwrap_metafield(&json!({ "jsonValue": { "10": 1300 } })),
            Some(json!({ "10": 1300 }))
        );
        assert_eq!(unwrap_metafield(&json!(1500)), Some(json!(1500)));
        assert_eq!(unwrap_metafield(&json!(null)), None);
        assert_eq!(unwrap_metafield(&json!({ "value": null })), None);
        assert_eq!(unwrap_metafield(&json!(true)), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(&json!(1)), Some(Money::from_cents(1)));
        assert_eq!(parse_price(&json!(1500.0)), Some(Money::from_cents(1500)));
        assert_eq!(parse_price(&json!(" 1500 ")), Some(Money::from_cents(1500)));
        assert_eq!(parse_price(&json!("1500.0")), Some(Money::from_cents(1500)));

        assert_eq!(parse_price(&json!(0)), None);
        assert_eq!(parse_price(&json!("0")), None);
        assert_eq!(parse_price(&json!(0.0)), None);
        assert_eq!(parse_price(&json!(-1)), None);
        assert_eq!(parse_price(&json!("-1")), None);
        assert_eq!(parse_price(&json!("15x")), None);
        assert_eq!(parse_price(&json!("")), None);
        assert_eq!(parse_price(&json!({ "amount": 1500 })), None);
        assert_eq!(parse_price(&json!("{\"amount\": 1500}")), None);
        assert_eq!(parse_price(&json!(null)), None);
    }

    #[test]
    fn test_parse_tier_table() {
        let parsed = parse_tier_table(&json!({ "10": 1300, "1": 1500, "50": "1100" }));
        assert_eq!(parsed, Some(table(&[(1, 1500), (10, 1300), (50, 1100)])));

        let parsed = parse_tier_table(&json!("{\"5\": 900}"));
        assert_eq!(parsed, Some(table(&[(5, 900)])));
    }

    #[test]
    fn test_parse_tier_table_drops_bad_entries() {
        let parsed = parse_tier_table(&json!({ "ten": 1300, "5": "cheap", "20": 1000 }));
        assert_eq!(parsed, Some(table(&[(20, 1000)])));

        let parsed = parse_tier_table(&json!({ "10": 0, "50": "0", "20": 1000 }));
        assert_eq!(parsed, Some(table(&[(20, 1000)])));

        assert_eq!(parse_tier_table(&json!({ "10": 0 })), None);
        assert_eq!(parse_tier_table(&json!({ "ten": 1300 })), None);
        assert_eq!(parse_tier_table(&json!({})), None);
        assert_eq!(parse_tier_table(&json!("{not json")), None);
        assert_eq!(parse_tier_table(&json!([1300])), None);
        assert_eq!(parse_tier_table(&json!(1300)), None);
    }

    #[test]
    fn test_price_for_picks_largest_threshold_not_above_quantity() {
        let tiers = table(&[(5, 1400), (10, 1300), (50, 1100)]);

        assert_eq!(tiers.price_for(1), None);
        assert_eq!(tiers.price_for(4), None);
        assert_eq!(tiers.price_for(5), Some((5, Money::from_cents(1400))));
        assert_eq!(tiers.price_for(49), Some((10, Money::from_cents(1300))));
        assert_eq!(tiers.price_for(50), Some((50, Money::from_cents(1100))));
        assert_eq!(tiers.price_for(10_000), Some((50, Money::from_cents(1100))));
    }

    #[test]
    fn test_variant_pricing_parse() {
        let pricing = VariantPricing::parse(&json!("{\"base_price_google\": 1400}")).unwrap();
        assert_eq!(pricing.get("base_price_google"), Some(&json!(1400)));
        assert_eq!(pricing.get("base_price"), None);

        assert!(VariantPricing::parse(&json!({ "base_price": 1 })).is_some());
        assert!(VariantPricing::parse(&json!("{}")).is_none());
        assert!(VariantPricing::parse(&json!({})).is_none());
        assert!(VariantPricing::parse(&json!("[1, 2]")).is_none());
        assert!(VariantPricing::parse(&json!("{broken")).is_none());
        assert!(VariantPricing::parse(&json!(42)).is_none());
    }
}
