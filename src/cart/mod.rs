//! Cart
//!
//! The cart ledger maps product ids to requested quantities. Prices are never cached: every
//! subtotal is recomputed from the current entries against the catalog.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    pricing::{PricingError, line_total, total_price},
    products::{Product, ProductId},
};

pub mod summary;

/// Errors returned by rejected cart updates. A rejected update leaves the ledger unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("quantity {0} is below 1")]
    InvalidQuantity(i64),

    /// The quantity does not fit a cart entry.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),
}

/// A product id and the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product_id: ProductId,
    quantity: NonZeroU32,
}

impl CartItem {
    /// The product this entry refers to.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// The requested quantity, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'c, 'a> {
    /// The product
    pub product: &'c Product<'a>,

    /// Requested quantity
    pub quantity: u32,

    /// Price per unit after the product discount
    pub unit_price: Money<'a, Currency>,

    /// `unit_price * quantity`
    pub line_total: Money<'a, Currency>,
}

/// Cart Ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartLedger {
    items: Vec<CartItem>,
}

impl CartLedger {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, inserting it with quantity 1 if absent.
    ///
    /// Returns the new quantity.
    pub fn add_or_increment(&mut self, product_id: impl Into<ProductId>) -> u32 {
        self.add_units(product_id.into(), NonZeroU32::MIN)
    }

    /// Add `quantity` units of a product, as the product detail page does.
    ///
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add(&mut self, product_id: impl Into<ProductId>, quantity: u32) -> Result<u32, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity(0))?;

        Ok(self.add_units(product_id.into(), quantity))
    }

    /// Remove a product from the cart entirely.
    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let position = self.position(product_id)?;
        let removed = self.items.remove(position);

        debug!(product_id, "removed cart item");

        Some(removed)
    }

    /// Replace the quantity of a product already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity < 1`, [`CartError::QuantityTooLarge`]
    /// if it exceeds `u32::MAX`, or [`CartError::ItemNotFound`] if the product is not in the cart.
    /// The cart is unchanged in every case.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let new_quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(CartError::QuantityTooLarge(quantity))?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_id.as_str() == product_id)
            .ok_or_else(|| CartError::ItemNotFound(ProductId::new(product_id)))?;

        item.quantity = new_quantity;

        debug!(product_id, quantity, "updated cart quantity");

        Ok(())
    }

    /// Quantity of a product in the cart.
    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product_id.as_str() == product_id)
            .map(CartItem::quantity)
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Entries that resolve against the catalog, with their prices.
    ///
    /// Entries whose product is not in the catalog are left out.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a discounted price or line total cannot be represented.
    pub fn lines<'c, 'a>(&self, catalog: &'c Catalog<'a>) -> Result<Vec<CartLine<'c, 'a>>, PricingError> {
        self.items
            .iter()
            .filter_map(|item| {
                let product = catalog.find(item.product_id.as_str());

                if product.is_none() {
                    debug!(product_id = %item.product_id, "dropping cart item missing from catalog");
                }

                product.map(|product| (product, item.quantity()))
            })
            .map(|(product, quantity)| {
                let unit_price = product.discounted_price()?;
                let line_total = line_total(&unit_price, quantity)?;

                Ok(CartLine {
                    product,
                    quantity,
                    unit_price,
                    line_total,
                })
            })
            .collect()
    }

    /// Sum of discounted line totals over entries that resolve against the catalog.
    ///
    /// An empty cart has a zero subtotal in the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if an amount cannot be represented.
    pub fn subtotal<'a>(&self, catalog: &Catalog<'a>) -> Result<Money<'a, Currency>, PricingError> {
        let lines = self.lines(catalog)?;

        total_price(lines.into_iter().map(|line| line.line_total), catalog.currency())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id.as_str() == product_id)
    }

    fn add_units(&mut self, product_id: ProductId, units: NonZeroU32) -> u32 {
        let quantity = match self.position(product_id.as_str()) {
            Some(position) => match self.items.get_mut(position) {
                Some(item) => {
                    item.quantity = item.quantity.saturating_add(units.get());
                    item.quantity
                }
                None => units,
            },
            None => {
                self.items.push(CartItem {
                    product_id: product_id.clone(),
                    quantity: units,
                });
                units
            }
        };

        debug!(%product_id, quantity = quantity.get(), "added to cart");

        quantity.get()
    }
}

impl From<Vec<CartItem>> for CartLedger {
    fn from(items: Vec<CartItem>) -> Self {
        let mut ledger = CartLedger::new();

        for item in items {
            ledger.add_units(item.product_id, item.quantity);
        }

        ledger
    }
}

impl From<CartLedger> for Vec<CartItem> {
    fn from(ledger: CartLedger) -> Self {
        ledger.items
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{discounts::Discount, products::ProductCategory};

    use super::*;

    fn catalog() -> Result<Catalog<'static>, Box<dyn std::error::Error>> {
        let products = [
            Product {
                id: ProductId::new("1"),
                name: "A".to_string(),
                description: String::new(),
                price: Money::from_minor(10_000, USD),
                discount: Discount::NONE,
                category: ProductCategory::Iphones,
                stock: 5,
                featured: false,
                image: None,
            },
            Product {
                id: ProductId::new("2"),
                name: "B".to_string(),
                description: String::new(),
                price: Money::from_minor(5_000, USD),
                discount: Discount::new(50)?,
                category: ProductCategory::Fundas,
                stock: 0,
                featured: false,
                image: None,
            },
        ];

        Ok(Catalog::with_products(products, USD)?)
    }

    #[test]
    fn add_or_increment_inserts_then_increments() {
        let mut cart = CartLedger::new();

        assert_eq!(cart.add_or_increment("1"), 1);
        assert_eq!(cart.add_or_increment("1"), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let mut cart = CartLedger::new();

        assert_eq!(cart.add("1", 0), Err(CartError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_deletes_entry() {
        let mut cart = CartLedger::new();

        cart.add_or_increment("1");
        cart.add_or_increment("2");

        let removed = cart.remove("1");

        assert_eq!(removed.map(|item| item.quantity()), Some(1));
        assert_eq!(cart.quantity_of("1"), None);
        assert_eq!(cart.remove("1"), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn set_quantity_below_one_leaves_cart_unchanged() -> TestResult {
        let mut cart = CartLedger::new();

        cart.add("1", 3)?;

        let before = cart.clone();

        assert_eq!(cart.set_quantity("1", 0), Err(CartError::InvalidQuantity(0)));
        assert_eq!(cart.set_quantity("1", -1), Err(CartError::InvalidQuantity(-1)));
        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn set_quantity_above_u32_range_leaves_cart_unchanged() -> TestResult {
        let mut cart = CartLedger::new();

        cart.add("1", 2)?;

        let before = cart.clone();
        let too_many = i64::from(u32::MAX) + 1;
        let result = cart.set_quantity("1", too_many);

        assert_eq!(result, Err(CartError::QuantityTooLarge(too_many)));
        assert_eq!(
            result.map_err(|err| err.to_string()),
            Err(format!("quantity {too_many} is too large"))
        );
        assert_eq!(cart, before);

        cart.set_quantity("1", i64::from(u32::MAX))?;
        assert_eq!(cart.quantity_of("1"), Some(u32::MAX));

        Ok(())
    }

    #[test]
    fn set_quantity_on_missing_item_leaves_cart_unchanged() {
        let mut cart = CartLedger::new();

        cart.add_or_increment("1");

        let before = cart.clone();

        assert_eq!(
            cart.set_quantity("9", 4),
            Err(CartError::ItemNotFound(ProductId::new("9")))
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let mut cart = CartLedger::new();

        cart.add_or_increment("1");
        cart.set_quantity("1", 7)?;

        assert_eq!(cart.quantity_of("1"), Some(7));

        Ok(())
    }

    #[test]
    fn subtotal_uses_full_price_without_discount() -> TestResult {
        let catalog = catalog()?;
        let mut cart = CartLedger::new();

        cart.add("1", 2)?;

        assert_eq!(cart.subtotal(&catalog)?, Money::from_minor(20_000, USD));

        Ok(())
    }

    #[test]
    fn subtotal_uses_discounted_price() -> TestResult {
        let catalog = catalog()?;
        let mut cart = CartLedger::new();

        cart.add_or_increment("2");

        assert_eq!(cart.subtotal(&catalog)?, Money::from_minor(2_500, USD));

        Ok(())
    }

    #[test]
    fn subtotal_drops_unresolved_entries() -> TestResult {
        let catalog = catalog()?;
        let mut cart = CartLedger::new();

        cart.add_or_increment("1");
        cart.add("ghost", 4)?;

        assert_eq!(cart.subtotal(&catalog)?, Money::from_minor(10_000, USD));
        assert_eq!(cart.lines(&catalog)?.len(), 1);
        assert_eq!(cart.len(), 2, "the entry itself stays in the ledger");

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let catalog = catalog()?;

        assert_eq!(CartLedger::new().subtotal(&catalog)?, Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn subtotal_reflects_every_mutation() -> TestResult {
        let catalog = catalog()?;
        let mut cart = CartLedger::new();

        cart.add_or_increment("1");
        assert_eq!(cart.subtotal(&catalog)?.to_minor_units(), 10_000);

        cart.add_or_increment("2");
        assert_eq!(cart.subtotal(&catalog)?.to_minor_units(), 12_500);

        cart.set_quantity("2", 3)?;
        assert_eq!(cart.subtotal(&catalog)?.to_minor_units(), 17_500);

        cart.remove("1");
        assert_eq!(cart.subtotal(&catalog)?.to_minor_units(), 7_500);

        Ok(())
    }

    #[test]
    fn lines_carry_unit_and_line_prices() -> TestResult {
        let catalog = catalog()?;
        let mut cart = CartLedger::new();

        cart.add("2", 2)?;

        let lines = cart.lines(&catalog)?;
        let line = lines.first().ok_or("missing line")?;

        assert_eq!(line.product.id.as_str(), "2");
        assert_eq!(line.unit_price, Money::from_minor(2_500, USD));
        assert_eq!(line.line_total, Money::from_minor(5_000, USD));

        Ok(())
    }

    #[test]
    fn deserializing_merges_duplicate_entries() -> TestResult {
        let cart: CartLedger = serde_norway::from_str(
            "- product_id: \"1\"\n  quantity: 1\n- product_id: \"1\"\n  quantity: 2\n",
        )?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("1"), Some(3));

        Ok(())
    }

    #[test]
    fn deserializing_rejects_zero_quantity() {
        let result: Result<CartLedger, _> =
            serde_norway::from_str("- product_id: \"1\"\n  quantity: 0\n");

        assert!(result.is_err(), "zero quantity should not deserialize");
    }
}
