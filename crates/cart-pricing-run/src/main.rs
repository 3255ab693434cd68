//! # cart-pricing-run Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments (clap exits 2 on bad arguments)
//! 3. Load config, read the input document
//! 4. Price the cart, write the result to stdout
//!
//! Exit codes: 0 on success (including carts that get no operations),
//! 1 on I/O or config failure.

use cart_pricing_run::{execute, init_tracing, Args};
use clap::Parser;

fn main() {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = execute(&args, &mut std::io::stdout().lock()) {
        tracing::error!("Cart pricing run failed: {e}");
        std::process::exit(1);
    }
}
