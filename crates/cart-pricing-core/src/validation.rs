//! # Validation Module
//!
//! Turns the wire schema into the validated domain.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Document is JSON, has a `cart`                                    │
//! │  └── Every line has a string id and an integer quantity                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - cart-level rules (reject the whole cart)       │
//! │  ├── Line ids are non-empty                                            │
//! │  └── Line ids are unique                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE - line-level rules (keep the cart)               │
//! │  ├── Quantity ≤ 0 → quantity 0, resolver skips the line                │
//! │  ├── Unreadable current price → treated as unknown                     │
//! │  └── Non-metafield product fields → dropped                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_pricing_core::types::RunInput;
//! use cart_pricing_core::validation::validate_input;
//!
//! let input: RunInput = serde_json::from_str(r#"{
//!     "cart": {
//!         "attribute": { "value": "google" },
//!         "lines": [{ "id": "line-1", "quantity": 2 }]
//!     }
//! }"#).unwrap();
//!
//! let cart = validate_input(input, "utm_source").unwrap();
//! assert_eq!(cart.channel_value.as_deref(), Some("google"));
//! assert_eq!(cart.lines[0].quantity, 2);
//! ```

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::error::{InputError, InputResult, ValidationError};
use crate::metadata::unwrap_metafield;
use crate::types::{
    Cart, CartInput, Line, LineInput, Merchandise, MerchandiseInput, Product, ProductInput,
    RunInput,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a cart line id.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_line_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "line id".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use cart_pricing_core::validation::validate_quantity;
///
/// assert_eq!(validate_quantity(3), Ok(3));
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-2).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u64> {
    u64::try_from(qty)
        .ok()
        .filter(|qty| *qty > 0)
        .ok_or_else(|| ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
}

/// Validates the name of the cart attribute that carries attribution.
///
/// ## Rules
/// - Must not be empty
/// - Letters, digits, underscores, hyphens and dots only
pub fn validate_attribute_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "attribute key".to_string(),
        });
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "attribute key".to_string(),
            reason: "must contain only letters, numbers, underscores, hyphens, and dots"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a channel name used as a field suffix.
///
/// ## Rules
/// - Lower-case letters, digits, underscores and hyphens only
///
/// Only configured channels go through this; attribution values from carts
/// are taken as they come.
pub fn validate_channel_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "channel".to_string(),
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "channel".to_string(),
            reason: "must contain only lower-case letters, numbers, underscores, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validation
// =============================================================================

/// Validates a full function input.
///
/// `attribute_key` names the cart attribute holding the channel.
pub fn validate_input(input: RunInput, attribute_key: &str) -> InputResult<Cart> {
    validate_cart(input.cart, attribute_key)
}

/// Validates a cart.
///
/// ## Errors
/// - [`InputError::InvalidLine`] for an empty line id
/// - [`InputError::DuplicateLine`] when two lines share an id
pub fn validate_cart(cart: CartInput, attribute_key: &str) -> InputResult<Cart> {
    let channel_value = channel_value(&cart, attribute_key);

    let mut seen = HashSet::with_capacity(cart.lines.len());
    let mut lines = Vec::with_capacity(cart.lines.len());

    for (index, line) in cart.lines.into_iter().enumerate() {
        validate_line_id(&line.id).map_err(|source| InputError::InvalidLine { index, source })?;

        if !seen.insert(line.id.clone()) {
            return Err(InputError::DuplicateLine(line.id));
        }

        lines.push(validate_line(line));
    }

    Ok(Cart {
        channel_value,
        lines,
    })
}

/// Finds the attribution value: the single queried attribute first (its key
/// may be omitted), then the full attribute list.
fn channel_value(cart: &CartInput, attribute_key: &str) -> Option<String> {
    let single = cart
        .attribute
        .iter()
        .filter(|attr| attr.key.as_deref().map_or(true, |key| key == attribute_key));

    let listed = cart
        .attributes
        .iter()
        .filter(|attr| attr.key.as_deref() == Some(attribute_key));

    single
        .chain(listed)
        .find_map(|attr| attr.value.clone())
}

fn validate_line(line: LineInput) -> Line {
    let quantity = match validate_quantity(line.quantity) {
        Ok(qty) => qty,
        Err(err) => {
            debug!(line_id = %line.id, quantity = line.quantity, %err, "Non-positive line quantity");
            0
        }
    };

    let current_unit_price = line
        .cost
        .as_ref()
        .and_then(|cost| cost.amount_per_quantity.amount.to_money());

    Line {
        id: line.id,
        quantity,
        current_unit_price,
        merchandise: line.merchandise.map(validate_merchandise),
    }
}

fn validate_merchandise(merchandise: MerchandiseInput) -> Merchandise {
    Merchandise {
        id: merchandise.id,
        pricing: merchandise.pricing.as_ref().and_then(unwrap_metafield),
        product: merchandise.product.map(validate_product),
    }
}

fn validate_product(product: ProductInput) -> Product {
    let fields: BTreeMap<String, _> = product
        .fields
        .iter()
        .filter_map(|(name, raw)| Some((name.clone(), unwrap_metafield(raw)?)))
        .collect();

    Product {
        id: product.id,
        fields,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use serde_json::json;

    fn input(value: serde_json::Value) -> RunInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(validate_quantity(999), Ok(999));
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_attribute_key() {
        assert!(validate_attribute_key("utm_source").is_ok());
        assert!(validate_attribute_key("_attribution.source").is_ok());
        assert!(validate_attribute_key("").is_err());
        assert!(validate_attribute_key("utm source").is_err());
    }

    #[test]
    fn test_validate_channel_name() {
        assert!(validate_channel_name("direct").is_ok());
        assert!(validate_channel_name("google-shopping").is_ok());
        assert!(validate_channel_name("").is_err());
        assert!(validate_channel_name("Google").is_err());
        assert!(validate_channel_name("a b").is_err());
    }

    #[test]
    fn test_channel_from_single_attribute() {
        let cart = validate_input(
            input(json!({ "cart": { "attribute": { "key": "utm_source", "value": "idealo" } } })),
            "utm_source",
        )
        .unwrap();
        assert_eq!(cart.channel_value.as_deref(), Some("idealo"));
    }

    #[test]
    fn test_channel_from_attribute_list() {
        let cart = validate_input(
            input(json!({ "cart": { "attributes": [
                { "key": "gift_note", "value": "hi" },
                { "key": "utm_source", "value": "google" }
            ] } })),
            "utm_source",
        )
        .unwrap();
        assert_eq!(cart.channel_value.as_deref(), Some("google"));
    }

    #[test]
    fn test_channel_ignores_other_keys() {
        let cart = validate_input(
            input(json!({ "cart": { "attribute": { "key": "gift_note", "value": "hi" } } })),
            "utm_source",
        )
        .unwrap();
        assert_eq!(cart.channel_value, None);
    }

    #[test]
    fn test_rejects_empty_line_id() {
        let result = validate_input(
            input(json!({ "cart": { "lines": [{ "id": " ", "quantity": 1 }] } })),
            "utm_source",
        );
        assert!(matches!(result, Err(InputError::InvalidLine { index: 0, .. })));
    }

    #[test]
    fn test_rejects_duplicate_line_ids() {
        let result = validate_input(
            input(json!({ "cart": { "lines": [
                { "id": "a", "quantity": 1 },
                { "id": "a", "quantity": 2 }
            ] } })),
            "utm_source",
        );
        assert!(matches!(result, Err(InputError::DuplicateLine(id)) if id == "a"));
    }

    #[test]
    fn test_non_positive_quantity_keeps_line() {
        let cart = validate_input(
            input(json!({ "cart": { "lines": [{ "id": "a", "quantity": -3 }] } })),
            "utm_source",
        )
        .unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 0);
    }

    #[test]
    fn test_line_fields_are_carried_over() {
        let cart = validate_input(
            input(json!({ "cart": { "lines": [{
                "id": "a",
                "quantity": 2,
                "cost": { "amountPerQuantity": { "amount": "18.50" } },
                "merchandise": {
                    "id": "v1",
                    "pricing": { "jsonValue": { "base_price": 1200 } },
                    "product": {
                        "id": "p1",
                        "base_price": { "value": "2000" },
                        "tiered_price": null,
                        "title": { "unexpected": true }
                    }
                }
            }] } })),
            "utm_source",
        )
        .unwrap();

        let line = &cart.lines[0];
        assert_eq!(line.current_unit_price, Some(Money::from_cents(1850)));

        let merchandise = line.merchandise.as_ref().unwrap();
        assert_eq!(merchandise.pricing, Some(json!({ "base_price": 1200 })));

        let product = merchandise.product.as_ref().unwrap();
        assert_eq!(product.field("base_price"), Some(&json!("2000")));
        assert_eq!(product.field("tiered_price"), None);
        assert_eq!(product.field("title"), None);
    }

    #[test]
    fn test_unreadable_current_price_is_unknown() {
        let cart = validate_input(
            input(json!({ "cart": { "lines": [{
                "id": "a",
                "quantity": 1,
                "cost": { "amountPerQuantity": { "amount": "about ten" } }
            }] } })),
            "utm_source",
        )
        .unwrap();
        assert_eq!(cart.lines[0].current_unit_price, None);
    }
}
