//! Catalog
//!
//! The static collection of products and categories a storefront session browses.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    categories::Category,
    products::{Product, ProductCategory, ProductId, ProductKey},
};

/// Errors related to catalog construction or lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A product id was inserted twice.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A product's currency differs from the catalog currency (product id, product currency, catalog currency).
    #[error("product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// No product has the requested id.
    #[error("product {0} not found")]
    ProductNotFound(String),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,

    /// Product keys in insertion order
    order: Vec<ProductKey>,

    /// Product id -> `SlotMap` key
    index: FxHashMap<ProductId, ProductKey>,

    categories: Vec<Category>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            order: Vec::new(),
            index: FxHashMap::default(),
            categories: Vec::new(),
            currency,
        }
    }

    /// Create a catalog with the given products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on a duplicate id or currency mismatch.
    pub fn with_products(
        products: impl IntoIterator<Item = Product<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the id is already present or the price is in another currency.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        if self.index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.id,
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let id = product.id.clone();
        let key = self.products.insert(product);

        self.order.push(key);
        self.index.insert(id, key);

        Ok(key)
    }

    /// Add a navigation category.
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Look up a product by id, as the product detail page does.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this id.
    pub fn product(&self, id: &str) -> Result<&Product<'a>, CatalogError> {
        self.find(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Look up a product by id.
    pub fn find(&self, id: &str) -> Option<&Product<'a>> {
        self.index
            .get(id)
            .and_then(|key| self.products.get(*key))
    }

    /// Look up a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// The key for a product id.
    pub fn key(&self, id: &str) -> Option<ProductKey> {
        self.index.get(id).copied()
    }

    /// Iterate over products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product<'a>> {
        self.order.iter().filter_map(|key| self.products.get(*key))
    }

    /// Products flagged as featured, in catalog order, up to `limit`.
    pub fn featured(&self, limit: usize) -> Vec<&Product<'a>> {
        self.products()
            .filter(|product| product.featured)
            .take(limit)
            .collect()
    }

    /// Navigation categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The navigation category describing a product category.
    pub fn category(&self, kind: ProductCategory) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.kind() == Some(kind))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{EUR, USD},
    };
    use testresult::TestResult;

    use crate::discounts::Discount;

    use super::*;

    fn product(id: &str, featured: bool) -> Product<'static> {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            description: String::new(),
            price: Money::from_minor(1_000, USD),
            discount: Discount::NONE,
            category: ProductCategory::Accesorios,
            stock: 1,
            featured,
            image: None,
        }
    }

    #[test]
    fn products_iterate_in_insertion_order() -> TestResult {
        let catalog = Catalog::with_products(
            [product("3", false), product("1", false), product("2", false)],
            USD,
        )?;

        let ids: Vec<&str> = catalog.products().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["3", "1", "2"]);
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_ids() -> TestResult {
        let mut catalog = Catalog::with_products([product("1", false)], USD)?;

        let result = catalog.insert(product("1", true));

        assert_eq!(
            result,
            Err(CatalogError::DuplicateProduct(ProductId::new("1")))
        );
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn insert_rejects_currency_mismatch() {
        let mut catalog = Catalog::new(EUR);

        let result = catalog.insert(product("1", false));

        assert!(matches!(
            result,
            Err(CatalogError::CurrencyMismatch(_, "USD", "EUR"))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn product_lookup_reports_missing_ids() -> TestResult {
        let catalog = Catalog::with_products([product("1", false)], USD)?;

        assert_eq!(catalog.product("1")?.name, "Producto 1");
        assert_eq!(
            catalog.product("99").err(),
            Some(CatalogError::ProductNotFound("99".to_string()))
        );

        Ok(())
    }

    #[test]
    fn key_and_get_agree() -> TestResult {
        let catalog = Catalog::with_products([product("7", false)], USD)?;

        let key = catalog.key("7").ok_or("missing key")?;

        assert_eq!(catalog.get(key).map(|p| p.id.as_str()), Some("7"));

        Ok(())
    }

    #[test]
    fn featured_takes_first_flagged_products() -> TestResult {
        let catalog = Catalog::with_products(
            [
                product("1", true),
                product("2", false),
                product("3", true),
                product("4", true),
            ],
            USD,
        )?;

        let ids: Vec<&str> = catalog.featured(2).iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["1", "3"]);

        Ok(())
    }

    #[test]
    fn category_lookup_matches_slug() {
        let mut catalog = Catalog::new(USD);

        catalog.add_category(Category {
            id: "ofertas".to_string(),
            name: "Ofertas".to_string(),
            description: "Descuentos exclusivos por tiempo limitado".to_string(),
            image: String::new(),
            product_count: None,
        });

        assert_eq!(
            catalog.category(ProductCategory::Ofertas).map(|c| c.name.as_str()),
            Some("Ofertas")
        );
        assert!(catalog.category(ProductCategory::Fundas).is_none());
    }
}
