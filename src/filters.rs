//! Filters
//!
//! Category, price-range, stock and text predicates over the catalog. All predicates must hold
//! for a product to be kept.

use std::{convert::Infallible, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    products::{Product, ProductCategory},
    text::{contains_folded, fold},
};

/// Value of the category selector meaning "every category".
pub const ALL_CATEGORIES: &str = "todos";

/// Upper bound of the price slider on the catalog page.
pub const DEFAULT_PRICE_MAX: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Errors raised while building a filter configuration from outside input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The lower price bound is above the upper one.
    #[error("price range is inverted: {min} > {max}")]
    InvertedPriceRange {
        /// Lower bound
        min: Decimal,
        /// Upper bound
        max: Decimal,
    },
}

/// Category selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(ProductCategory),

    /// A slug naming no category; admits nothing
    Unknown(String),
}

impl CategoryFilter {
    /// Seed the filter from the `categoria` query parameter.
    ///
    /// A missing or empty parameter selects every category. An unknown slug is kept and
    /// matches no product.
    #[must_use]
    pub fn from_query(categoria: Option<&str>) -> Self {
        match categoria.map(str::trim) {
            None | Some("") => Self::All,
            Some(value) => Self::from(value),
        }
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn admits(&self, category: ProductCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
            CategoryFilter::Unknown(_) => false,
        }
    }

    /// Selector value for this filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category.slug(),
            CategoryFilter::Unknown(slug) => slug,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            return Self::All;
        }

        value
            .parse()
            .map_or_else(|_err| Self::Unknown(value.to_string()), Self::Only)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::Unknown(slug) => slug,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter configuration selected on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Category selection
    pub category: CategoryFilter,

    /// Inclusive lower bound on the base price
    pub price_min: Decimal,

    /// Inclusive upper bound on the base price
    pub price_max: Decimal,

    /// Hide products with no stock
    pub in_stock_only: bool,

    /// Case-insensitive substring of the product name
    pub search_text: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            price_min: Decimal::ZERO,
            price_max: DEFAULT_PRICE_MAX,
            in_stock_only: true,
            search_text: String::new(),
        }
    }
}

impl FilterConfig {
    /// A configuration that keeps every product.
    #[must_use]
    pub fn everything() -> Self {
        Self {
            category: CategoryFilter::All,
            price_min: Decimal::MIN,
            price_max: Decimal::MAX,
            in_stock_only: false,
            search_text: String::new(),
        }
    }

    /// Default configuration with the category seeded from the `categoria` query parameter.
    #[must_use]
    pub fn from_query(categoria: Option<&str>) -> Self {
        Self {
            category: CategoryFilter::from_query(categoria),
            ..Self::default()
        }
    }

    /// Set both price bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedPriceRange`] if `min > max`; the configuration is unchanged.
    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) -> Result<(), FilterError> {
        if min > max {
            return Err(FilterError::InvertedPriceRange { min, max });
        }

        self.price_min = min;
        self.price_max = max;

        Ok(())
    }

    /// Whether a product satisfies every predicate.
    pub fn matches(&self, product: &Product<'_>) -> bool {
        self.matches_with_needle(product, &fold(&self.search_text))
    }

    fn matches_with_needle(&self, product: &Product<'_>, needle: &str) -> bool {
        let price = product.price.amount();

        self.category.admits(product.category)
            && self.price_min <= *price
            && *price <= self.price_max
            && (!self.in_stock_only || product.is_in_stock())
            && contains_folded(&product.name, needle)
    }
}

/// Products of the catalog passing `config`, in catalog order.
pub fn filter_products<'c, 'a>(
    catalog: &'c Catalog<'a>,
    config: &FilterConfig,
) -> Vec<&'c Product<'a>> {
    let needle = fold(&config.search_text);

    catalog
        .products()
        .filter(|product| config.matches_with_needle(product, &needle))
        .collect()
}
