//! Products

use std::{borrow::Borrow, fmt, str::FromStr};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

use crate::{
    discounts::Discount,
    pricing::{PricingError, discounted_price},
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Error returned when a category slug is not one of the storefront categories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

/// Public identifier of a product, as used in URLs and cart entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storefront product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Phones
    Iphones,

    /// Cases
    Fundas,

    /// Chargers
    Cargadores,

    /// Accessories
    Accesorios,

    /// Offers
    Ofertas,
}

impl ProductCategory {
    /// Every category, in navigation order.
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Iphones,
        ProductCategory::Fundas,
        ProductCategory::Cargadores,
        ProductCategory::Accesorios,
        ProductCategory::Ofertas,
    ];

    /// The slug used in fixtures and in the `categoria` query parameter.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            ProductCategory::Iphones => "iphones",
            ProductCategory::Fundas => "fundas",
            ProductCategory::Cargadores => "cargadores",
            ProductCategory::Accesorios => "accesorios",
            ProductCategory::Ofertas => "ofertas",
        }
    }

    /// Badge label shown on a product detail page.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Iphones => "iPhone",
            ProductCategory::Fundas => "Funda Premium",
            ProductCategory::Cargadores => "Cargador",
            ProductCategory::Accesorios => "Accesorio",
            ProductCategory::Ofertas => "Oferta Especial",
        }
    }

    /// Plural name shown in category navigation.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ProductCategory::Iphones => "iPhones",
            ProductCategory::Fundas => "Fundas",
            ProductCategory::Cargadores => "Cargadores",
            ProductCategory::Accesorios => "Accesorios",
            ProductCategory::Ofertas => "Ofertas",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|category| category.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// At least one unit available
    InStock,

    /// No units available
    SoldOut,
}

impl StockStatus {
    /// Badge label for the status.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "EN STOCK",
            StockStatus::SoldOut => "AGOTADO",
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Product base price
    pub price: Money<'a, Currency>,

    /// Percentage discount applied to the base price
    pub discount: Discount,

    /// Product category
    pub category: ProductCategory,

    /// Units available
    pub stock: u32,

    /// Whether the product is highlighted on the homepage
    pub featured: bool,

    /// Image reference
    pub image: Option<String>,
}

impl<'a> Product<'a> {
    /// Price after applying the product discount.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the discounted amount cannot be represented.
    pub fn discounted_price(&self) -> Result<Money<'a, Currency>, PricingError> {
        discounted_price(&self.price, self.discount)
    }

    /// Whether the product carries a non-zero discount.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        !self.discount.is_none()
    }

    /// Whether at least one unit is available.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Availability of the product.
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        if self.is_in_stock() {
            StockStatus::InStock
        } else {
            StockStatus::SoldOut
        }
    }
}
