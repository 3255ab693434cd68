//! # Function Entry Point
//!
//! What the checkout host calls: input document in, result document out.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RunInput ──► validate_input ──┬──► Err ──► warn!, empty result         │
//! │                                │                                        │
//! │                                └──► Cart                                │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                     Channel::from_attribute(utm_source, default)        │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                     LinePricer::resolve ──► CartTransformResult         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here fails. The worst outcome for the shopper is an unchanged cart.

use tracing::{debug, warn};

use crate::channel::Channel;
use crate::error::InputError;
use crate::output::CartTransformResult;
use crate::resolver::LinePricer;
use crate::types::{Cart, RunInput};
use crate::validation::validate_input;
use crate::DEFAULT_ATTRIBUTE_KEY;

/// Knobs the host (or the runner's config) controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingOptions {
    /// Cart attribute holding the traffic source.
    pub attribute_key: String,

    /// Channel used when the cart carries no attribution.
    pub default_channel: Channel,

    /// Skip lines whose current price already matches.
    pub skip_unchanged: bool,
}

impl Default for PricingOptions {
    fn default() -> Self {
        PricingOptions {
            attribute_key: DEFAULT_ATTRIBUTE_KEY.to_string(),
            default_channel: Channel::Direct,
            skip_unchanged: false,
        }
    }
}

/// Runs the function on a parsed input document.
pub fn run(input: RunInput, options: &PricingOptions) -> CartTransformResult {
    match validate_input(input, &options.attribute_key) {
        Ok(cart) => price_cart(&cart, options),
        Err(err) => reject(&err),
    }
}

/// Runs the function on a raw JSON document.
///
/// ## Example
/// ```rust
/// use cart_pricing_core::function::{run_json, PricingOptions};
///
/// let result = run_json(r#"{
///     "cart": {
///         "attribute": { "key": "utm_source", "value": "google" },
///         "lines": [{
///             "id": "line-1",
///             "quantity": 1,
///             "merchandise": { "product": { "base_price_google": { "value": "1500" } } }
///         }]
///     }
/// }"#, &PricingOptions::default());
/// assert_eq!(result.operations.len(), 1);
///
/// assert!(run_json("not json", &PricingOptions::default()).is_empty());
/// ```
pub fn run_json(document: &str, options: &PricingOptions) -> CartTransformResult {
    match serde_json::from_str::<RunInput>(document) {
        Ok(input) => run(input, options),
        Err(err) => reject(&InputError::from(err)),
    }
}

/// Prices an already validated cart.
pub fn price_cart(cart: &Cart, options: &PricingOptions) -> CartTransformResult {
    let channel = Channel::from_attribute(cart.channel_value.as_deref(), &options.default_channel);
    debug!(%channel, lines = cart.lines.len(), "Pricing cart");

    LinePricer::new(&channel)
        .skip_unchanged(options.skip_unchanged)
        .resolve(cart)
        .into_iter()
        .collect()
}

fn reject(err: &InputError) -> CartTransformResult {
    warn!(error = %err, "Rejected cart input, no operations");
    CartTransformResult::empty()
}

// =============================================================================
// Unit Tests
// =============================================================================
