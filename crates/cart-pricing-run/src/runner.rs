//! # Runner
//!
//! Command-line parsing and the read → price → write cycle.
//!
//! ## Usage
//! ```bash
//! # Price a fixture
//! cargo run -p cart-pricing-run -- --input fixtures/google-tiered.json --pretty
//!
//! # Pipe from another tool
//! cat input.json | cargo run -p cart-pricing-run
//!
//! # Use a specific config file
//! cargo run -p cart-pricing-run -- --config ./pricing.toml --input input.json
//! ```

use std::io::{Read, Write};
use std::path::PathBuf;

use cart_pricing_core::run_json;
use clap::Parser;
use tracing::info;

use crate::config::PricingConfig;
use crate::error::RunResult;

/// Command line of `cart-pricing-run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "cart-pricing-run")]
#[command(version, about = "Prices a cart transform input document and prints the result")]
pub struct Args {
    /// Input document (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Config file (default: platform config dir/pricing.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the result
    #[arg(short, long)]
    pub pretty: bool,
}

/// Prices one input document and renders the result.
pub fn price_document(document: &str, config: &PricingConfig, pretty: bool) -> RunResult<String> {
    let result = run_json(document, &config.pricing_options());
    info!(operations = result.operations.len(), "Cart priced");

    let rendered = if pretty || config.output.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    Ok(rendered)
}

/// Full cycle: load config, read input, price, write to `out`.
pub fn execute(args: &Args, out: &mut impl Write) -> RunResult<()> {
    let config = PricingConfig::load(args.config.clone())?;

    let document = match &args.input {
        Some(path) => {
            info!(?path, "Reading input document");
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let rendered = price_document(&document, &config, args.pretty)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
