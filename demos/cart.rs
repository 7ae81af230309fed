//! Cart Example
//!
//! Prices the pre-seeded cart of a fixture set and prints the cart summary.
//!
//! Use `-s` to load a fixture set by name

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront::{cart::summary::CartSummary, config::DemoArgs, fixtures::Fixture};

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoArgs::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let fixture = Fixture::from_set_in(&args.fixtures, &args.set)?;
    let catalog = fixture.catalog()?;
    let cart = fixture.cart()?;

    info!(set = %args.set, entries = cart.len(), "loaded cart");

    let summary = CartSummary::from_ledger(&cart, &catalog)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle)?;

    println!("\n{} artículos", summary.item_count());

    Ok(())
}
