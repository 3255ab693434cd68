//! # cart-pricing-core: Channel and Tier Pricing for Cart Lines
//!
//! This crate prices cart lines by traffic source and ordered quantity.
//! It is pure logic with zero I/O, so it can run inside the checkout host
//! (compiled to WASM) or behind the local runner.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Pricing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Storefront: sets cart attribute utm_source=google        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ cart + metafields                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Checkout host / cart-pricing-run (stdin → stdout)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ cart-pricing-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation│  │ metadata  │  │ resolver  │  │   │
//! │  │   │ RunInput  │─►│   Cart    │  │ TierTable │─►│LinePricer │  │   │
//! │  │   │   Cart    │  │  rules    │  │ parse_*   │  │ decisions │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                      ▼        │   │
//! │  │                                  output::CartTransformResult  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CONFIG FILES • NO SUBSCRIBER • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire schema and validated domain (Cart, Line, Product)
//! - [`validation`] - Boundary rules turning the schema into the domain
//! - [`channel`] - Channel normalisation and price field keys
//! - [`metadata`] - Lenient readers for pricing metafields
//! - [`money`] - Money type in minor units
//! - [`resolver`] - Per-line price resolution
//! - [`output`] - Result document
//! - [`function`] - Entry point tying it together
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_pricing_core::function::{run_json, PricingOptions};
//!
//! let result = run_json(r#"{
//!     "cart": {
//!         "attribute": { "key": "utm_source", "value": "google" },
//!         "lines": [{
//!             "id": "gid://shopify/CartLine/1",
//!             "quantity": 12,
//!             "merchandise": { "product": {
//!                 "base_price": { "value": "2000" },
//!                 "tiered_price_google": { "value": "{\"10\": 1300}" }
//!             } }
//!         }]
//!     }
//! }"#, &PricingOptions::default());
//!
//! let json = serde_json::to_value(&result).unwrap();
//! assert_eq!(
//!     json["operations"][0]["lineUpdate"]["price"]["adjustment"]["fixedPricePerUnit"]["amount"],
//!     1300
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod channel;
pub mod error;
pub mod function;
pub mod metadata;
pub mod money;
pub mod output;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use channel::{Channel, PriceField};
pub use error::{InputError, ValidationError};
pub use function::{price_cart, run, run_json, PricingOptions};
pub use money::Money;
pub use output::CartTransformResult;
pub use resolver::{resolve, LineDecision, LinePricer, PriceSource, SkipReason};
pub use types::{Cart, Line, Merchandise, PriceOperation, Product, RunInput};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cart attribute the storefront writes the traffic source into.
pub const DEFAULT_ATTRIBUTE_KEY: &str = "utm_source";
