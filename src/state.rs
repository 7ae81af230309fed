//! Storefront State
//!
//! Everything the shopper can change, held in one serializable value. Listings and totals are
//! derived from it on demand.

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLedger,
    catalog::Catalog,
    filters::FilterConfig,
    listing::CatalogView,
    pricing::PricingError,
    sorting::SortKey,
};

/// Filter, sort and cart selections of a storefront session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontState {
    /// Catalog page filters
    pub filters: FilterConfig,

    /// Catalog page ordering
    pub sort: SortKey,

    /// Cart contents
    pub cart: CartLedger,
}

impl StorefrontState {
    /// State of a fresh catalog page visit with the category taken from `categoria`.
    #[must_use]
    pub fn from_query(categoria: Option<&str>) -> Self {
        Self {
            filters: FilterConfig::from_query(categoria),
            ..Self::default()
        }
    }

    /// Replace the cart, keeping the catalog selections.
    #[must_use]
    pub fn with_cart(self, cart: CartLedger) -> Self {
        Self { cart, ..self }
    }

    /// The listing for the current filters and ordering.
    pub fn catalog_view<'c, 'a>(&self, catalog: &'c Catalog<'a>) -> CatalogView<'c, 'a> {
        CatalogView::build(catalog, &self.filters, self.sort)
    }

    /// Subtotal of the current cart.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an amount cannot be represented.
    pub fn cart_subtotal<'a>(&self, catalog: &Catalog<'a>) -> Result<Money<'a, Currency>, PricingError> {
        self.cart.subtotal(catalog)
    }
}
