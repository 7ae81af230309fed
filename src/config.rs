//! Demo configuration

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

use crate::{
    filters::{FilterConfig, FilterError},
    sorting::SortKey,
    state::StorefrontState,
};

/// Storefront demo configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog and cart demo", long_about = None)]
pub struct DemoArgs {
    /// Fixture directory
    #[arg(long, env = "STOREFRONT_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set name
    #[arg(short, long, env = "STOREFRONT_FIXTURE_SET", default_value = "storefront")]
    pub set: String,

    /// Category slug, or `todos` for every category
    #[arg(short, long, env = "STOREFRONT_CATEGORY")]
    pub categoria: Option<String>,

    /// Ordering (featured, price-asc, price-desc, name-asc, name-desc)
    #[arg(long, env = "STOREFRONT_SORT", default_value = "featured")]
    pub sort: SortKey,

    /// Text the product name must contain
    #[arg(short = 'q', long, env = "STOREFRONT_SEARCH", default_value = "")]
    pub search: String,

    /// Lower price bound
    #[arg(long, env = "STOREFRONT_PRICE_MIN")]
    pub price_min: Option<Decimal>,

    /// Upper price bound
    #[arg(long, env = "STOREFRONT_PRICE_MAX")]
    pub price_max: Option<Decimal>,

    /// Also list products with no stock
    #[arg(long, env = "STOREFRONT_INCLUDE_SOLD_OUT")]
    pub include_sold_out: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl DemoArgs {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // .env is optional
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Catalog page filters selected by these arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedPriceRange`] if the price bounds are inverted.
    pub fn to_filters(&self) -> Result<FilterConfig, FilterError> {
        let mut filters = FilterConfig::from_query(self.categoria.as_deref());

        filters.set_price_range(
            self.price_min.unwrap_or(filters.price_min),
            self.price_max.unwrap_or(filters.price_max),
        )?;

        filters.in_stock_only = !self.include_sold_out;
        filters.search_text.clone_from(&self.search);

        Ok(filters)
    }

    /// Storefront state selected by these arguments, with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedPriceRange`] if the price bounds are inverted.
    pub fn to_state(&self) -> Result<StorefrontState, FilterError> {
        Ok(StorefrontState {
            filters: self.to_filters()?,
            sort: self.sort,
            ..StorefrontState::default()
        })
    }
}
