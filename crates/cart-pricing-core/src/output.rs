//! # Cart Transform Result
//!
//! The document handed back to the checkout host.
//!
//! ```json
//! { "operations": [ { "lineUpdate": {
//!     "cartLineId": "gid://shopify/CartLine/1",
//!     "price": { "adjustment": { "fixedPricePerUnit": { "amount": 1300 } } }
//! } } ] }
//! ```
//!
//! TypeScript bindings are exported with `ts-rs` so extension tooling reads
//! the same shape.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::PriceOperation;

/// Root of the result document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
pub struct CartTransformResult {
    pub operations: Vec<CartOperation>,
}

impl CartTransformResult {
    /// A result that leaves the cart untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no line is repriced.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl FromIterator<PriceOperation> for CartTransformResult {
    fn from_iter<I: IntoIterator<Item = PriceOperation>>(iter: I) -> Self {
        CartTransformResult {
            operations: iter.into_iter().map(CartOperation::from).collect(),
        }
    }
}

/// A single cart operation. Only line updates are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum CartOperation {
    LineUpdate(LineUpdateOperation),
}

impl From<PriceOperation> for CartOperation {
    fn from(operation: PriceOperation) -> Self {
        CartOperation::LineUpdate(LineUpdateOperation {
            cart_line_id: operation.line_id,
            price: LineUpdatePrice {
                adjustment: PriceAdjustment {
                    fixed_price_per_unit: FixedPricePerUnit {
                        amount: operation.unit_price,
                    },
                },
            },
        })
    }
}

/// Reprices one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineUpdateOperation {
    pub cart_line_id: String,
    pub price: LineUpdatePrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineUpdatePrice {
    pub adjustment: PriceAdjustment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustment {
    pub fixed_price_per_unit: FixedPricePerUnit,
}

/// Unit price in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FixedPricePerUnit {
    pub amount: Money,
}
