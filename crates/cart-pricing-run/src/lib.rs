//! # cart-pricing-run: Local Runner
//!
//! Feeds a cart transform input document through [`cart_pricing_core`]
//! and prints the result, the way the checkout host would.
//!
//! ## Modules
//!
//! - [`config`] - `pricing.toml` and `CART_PRICING_*` overrides
//! - [`runner`] - Argument parsing and the read/price/write cycle
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod runner;

pub use config::PricingConfig;
pub use error::{ConfigError, RunError, RunResult};
pub use runner::{execute, price_document, Args};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout carries only the result document.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every skipped line
/// - `RUST_LOG=cart_pricing_core=trace` - Show priced lines too
/// - Default: INFO, DEBUG for the cart pricing crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cart_pricing_core=debug,cart_pricing_run=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
