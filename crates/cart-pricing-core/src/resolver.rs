//! # Line Price Resolver
//!
//! Decides the unit price of every cart line for one channel.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For each line (channel = google):                                      │
//! │                                                                         │
//! │  1. base price, first hit wins                                          │
//! │     ├── variant pricing["base_price_google"]                            │
//! │     ├── product.base_price_google                                       │
//! │     └── product.base_price                                              │
//! │     (nothing? → skip the line)                                          │
//! │                                                                         │
//! │  2. tier table, same order with tiered_price_*                          │
//! │     └── largest threshold ≤ quantity replaces the base price            │
//! │                                                                         │
//! │  3. emit PriceOperation { line_id, unit_price }                         │
//! │                                                                         │
//! │  For channel = direct the qualified and unqualified product fields      │
//! │  are the same field, so it is consulted once.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_pricing_core::channel::Channel;
//! use cart_pricing_core::resolver::resolve;
//! use cart_pricing_core::types::{Cart, Line, Merchandise, Product};
//! use serde_json::json;
//!
//! let product = Product {
//!     id: None,
//!     fields: [("base_price".to_string(), json!("2000"))].into_iter().collect(),
//! };
//! let cart = Cart {
//!     channel_value: None,
//!     lines: vec![Line {
//!         id: "line-1".to_string(),
//!         quantity: 1,
//!         current_unit_price: None,
//!         merchandise: Some(Merchandise { id: None, pricing: None, product: Some(product) }),
//!     }],
//! };
//!
//! let operations = resolve(&cart, &Channel::Direct);
//! assert_eq!(operations[0].unit_price.cents(), 2000);
//! ```

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::channel::{Channel, PriceField};
use crate::metadata::{parse_price, parse_tier_table, VariantPricing};
use crate::types::{Cart, Line, PriceOperation, Product};

// =============================================================================
// Decisions
// =============================================================================

/// Where a price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Variant-level pricing document.
    Variant,
    /// Product field qualified with the active channel.
    ProductChannel,
    /// Unqualified product field.
    ProductDefault,
}

/// Why a line received no operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMerchandise,
    NoProduct,
    InvalidQuantity,
    NoBasePrice,
    /// The line already sells at the resolved price.
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoMerchandise => "no merchandise",
            SkipReason::NoProduct => "no product",
            SkipReason::InvalidQuantity => "quantity not positive",
            SkipReason::NoBasePrice => "no base price",
            SkipReason::Unchanged => "price unchanged",
        };
        f.write_str(text)
    }
}

/// Outcome for a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineDecision {
    Priced {
        operation: PriceOperation,
        /// Source of the base price.
        source: PriceSource,
        /// Threshold of the applied tier, if a tier beat the base price.
        tier: Option<u64>,
    },
    Skipped(SkipReason),
}

impl LineDecision {
    /// The operation, when the line was priced.
    pub fn operation(&self) -> Option<&PriceOperation> {
        match self {
            LineDecision::Priced { operation, .. } => Some(operation),
            LineDecision::Skipped(_) => None,
        }
    }

    /// Consumes the decision, keeping only the operation.
    pub fn into_operation(self) -> Option<PriceOperation> {
        match self {
            LineDecision::Priced { operation, .. } => Some(operation),
            LineDecision::Skipped(_) => None,
        }
    }
}

// =============================================================================
// Line Pricer
// =============================================================================

/// Prices cart lines for one channel.
#[derive(Debug, Clone)]
pub struct LinePricer<'a> {
    channel: &'a Channel,
    skip_unchanged: bool,
}

impl<'a> LinePricer<'a> {
    pub fn new(channel: &'a Channel) -> Self {
        LinePricer {
            channel,
            skip_unchanged: false,
        }
    }

    /// Suppress operations for lines already at their resolved price.
    pub fn skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    /// Decides one line.
    pub fn price_line(&self, line: &Line) -> LineDecision {
        let Some(merchandise) = line.merchandise.as_ref() else {
            return LineDecision::Skipped(SkipReason::NoMerchandise);
        };
        let Some(product) = merchandise.product.as_ref() else {
            return LineDecision::Skipped(SkipReason::NoProduct);
        };
        if line.quantity == 0 {
            return LineDecision::Skipped(SkipReason::InvalidQuantity);
        }

        let variant = merchandise.pricing.as_ref().and_then(VariantPricing::parse);

        let Some((base, source)) =
            self.lookup(variant.as_ref(), product, PriceField::Base, parse_price)
        else {
            return LineDecision::Skipped(SkipReason::NoBasePrice);
        };

        let tier = self
            .lookup(variant.as_ref(), product, PriceField::Tiered, parse_tier_table)
            .and_then(|(table, _)| table.price_for(line.quantity));

        let unit_price = tier.map_or(base, |(_, price)| price);

        if self.skip_unchanged && line.current_unit_price == Some(unit_price) {
            return LineDecision::Skipped(SkipReason::Unchanged);
        }

        LineDecision::Priced {
            operation: PriceOperation {
                line_id: line.id.clone(),
                unit_price,
            },
            source,
            tier: tier.map(|(threshold, _)| threshold),
        }
    }

    /// Prices every line, keeping line order. Skipped lines are logged and
    /// left out.
    pub fn resolve(&self, cart: &Cart) -> Vec<PriceOperation> {
        cart.lines
            .iter()
            .filter_map(|line| {
                let decision = self.price_line(line);
                log_decision(line, &decision);
                decision.into_operation()
            })
            .collect()
    }

    /// First source in priority order whose payload parses.
    fn lookup<T>(
        &self,
        variant: Option<&VariantPricing>,
        product: &Product,
        field: PriceField,
        parse: fn(&Value) -> Option<T>,
    ) -> Option<(T, PriceSource)> {
        let key = field.key(self.channel);

        let from_variant = || {
            variant
                .and_then(|pricing| pricing.get(&key))
                .and_then(parse)
                .map(|value| (value, PriceSource::Variant))
        };

        let from_channel_field = || {
            if self.channel.is_direct() {
                return None;
            }
            product
                .field(&key)
                .and_then(parse)
                .map(|value| (value, PriceSource::ProductChannel))
        };

        let from_default_field = || {
            product
                .field(field.unqualified())
                .and_then(parse)
                .map(|value| (value, PriceSource::ProductDefault))
        };

        from_variant()
            .or_else(from_channel_field)
            .or_else(from_default_field)
    }
}

/// Prices a cart for a channel.
pub fn resolve(cart: &Cart, channel: &Channel) -> Vec<PriceOperation> {
    LinePricer::new(channel).resolve(cart)
}

fn log_decision(line: &Line, decision: &LineDecision) {
    match decision {
        LineDecision::Priced {
            operation,
            source,
            tier,
        } => {
            trace!(
                line_id = %line.id,
                quantity = line.quantity,
                unit_price = %operation.unit_price,
                ?source,
                ?tier,
                "Line priced"
            );
        }
        LineDecision::Skipped(reason) => {
            debug!(line_id = %line.id, %reason, "Line skipped");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
