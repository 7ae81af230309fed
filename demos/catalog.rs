//! Catalog Example
//!
//! Lists the catalog page for a fixture set.
//!
//! Use `-c` to pick a category (`todos` for every category)
//! Use `--sort` to pick an ordering (`featured`, `price-asc`, `price-desc`, `name-asc`, `name-desc`)
//! Use `-q` to search product names

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront::{config::DemoArgs, fixtures::Fixture, listing::write_listing};

/// Catalog Example
pub fn main() -> Result<()> {
    let args = DemoArgs::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let fixture = Fixture::from_set_in(&args.fixtures, &args.set)?;
    let catalog = fixture.catalog()?;
    let state = args.to_state()?;

    info!(set = %args.set, products = catalog.len(), "loaded catalog");

    let view = state.catalog_view(&catalog);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_listing(&mut handle, &view)?;

    Ok(())
}
