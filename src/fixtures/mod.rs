//! Fixtures
//!
//! YAML data sets standing in for the storefront's mock data. A set named `storefront` is
//! spread over `products/storefront.yml`, `categories/storefront.yml` and `carts/storefront.yml`
//! under the base path; admin dashboard records live in `admin/<name>.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::{
    admin::{CategoryRecord, ProductRecord},
    cart::{CartError, CartLedger},
    catalog::{Catalog, CatalogError},
    categories::Category,
    fixtures::products::ProductsFixture,
    products::{Product, ProductId},
};

pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product id defined more than once
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart construction error
    #[error("Failed to build cart: {0}")]
    Cart(#[from] CartError),
}

/// Wrapper for categories in YAML
#[derive(Debug, Deserialize)]
struct CategoriesFixture {
    categories: Vec<Category>,
}

/// Wrapper for a pre-seeded cart in YAML
#[derive(Debug, Deserialize)]
struct CartFixture {
    items: Vec<CartItemFixture>,
}

/// Cart entry from YAML
#[derive(Debug, Deserialize)]
struct CartItemFixture {
    product: String,
    quantity: u32,
}

/// Wrapper for admin dashboard records in YAML
#[derive(Debug, Deserialize)]
struct AdminFixture {
    #[serde(default)]
    products: Vec<ProductRecord>,
    #[serde(default)]
    categories: Vec<CategoryRecord>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in load order
    products: Vec<Product<'static>>,

    /// Ids of loaded products
    product_ids: FxHashSet<ProductId>,

    /// Navigation categories
    categories: Vec<Category>,

    /// Pre-seeded cart entries (product id, quantity)
    cart_items: Vec<(ProductId, u32)>,

    /// Admin dashboard products
    admin_products: Vec<ProductRecord>,

    /// Admin dashboard categories
    admin_categories: Vec<CategoryRecord>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            product_ids: FxHashSet::default(),
            categories: Vec::new(),
            cart_items: Vec::new(),
            admin_products: Vec::new(),
            admin_categories: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an id repeats, or if there are
    /// currency mismatches.
    #[tracing::instrument(skip(self), fields(base_path = %self.base_path.display()))]
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        let mut currency = self.currency;
        let mut product_ids = self.product_ids.clone();
        let mut loaded = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let (_minor_units, product_currency) = products::parse_price(&product_fixture.price)?;

            match currency {
                Some(existing) if existing != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            let product: Product<'static> = product_fixture.try_into()?;

            if !product_ids.insert(product.id.clone()) {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }

            loaded.push(product);
        }

        // commit only once the whole file is valid
        self.currency = currency;
        self.product_ids = product_ids;
        self.products.extend(loaded);

        debug!(products = self.products.len(), "loaded products");

        Ok(self)
    }

    /// Load navigation categories from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_categories(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CategoriesFixture = self.read("categories", name)?;

        self.categories.extend(fixture.categories);

        Ok(self)
    }

    /// Load a pre-seeded cart from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it references a product that
    /// has not been loaded.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;

        for item in fixture.items {
            if !self.product_ids.contains(item.product.as_str()) {
                return Err(FixtureError::ProductNotFound(item.product));
            }

            self.cart_items
                .push((ProductId::new(item.product), item.quantity));
        }

        Ok(self)
    }

    /// Load admin dashboard products and categories from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_admin(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: AdminFixture = self.read("admin", name)?;

        self.admin_products.extend(fixture.products);
        self.admin_categories.extend(fixture.categories);

        Ok(self)
    }

    /// Load a complete storefront set (products, categories and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete storefront set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_categories(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Build a catalog from the loaded products and categories
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded.
    pub fn catalog(&self) -> Result<Catalog<'static>, FixtureError> {
        let currency = self.currency()?;
        let mut catalog = Catalog::with_products(self.products.iter().cloned(), currency)?;

        for category in &self.categories {
            catalog.add_category(category.clone());
        }

        Ok(catalog)
    }

    /// Build the pre-seeded cart
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has a zero quantity.
    pub fn cart(&self) -> Result<CartLedger, FixtureError> {
        let mut cart = CartLedger::new();

        for (product_id, quantity) in &self.cart_items {
            cart.add(product_id.clone(), *quantity)?;
        }

        Ok(cart)
    }

    /// Loaded products
    pub fn products(&self) -> &[Product<'static>] {
        &self.products
    }

    /// Loaded navigation categories
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Admin dashboard products
    pub fn admin_products(&self) -> &[ProductRecord] {
        &self.admin_products
    }

    /// Admin dashboard categories
    pub fn admin_categories(&self) -> &[CategoryRecord] {
        &self.admin_categories
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));
        let contents = read_file(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::USD;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, kind: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(kind);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_products_categories_and_cart() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        assert!(!fixture.products().is_empty());
        assert_eq!(fixture.categories().len(), 5);
        assert_eq!(fixture.currency()?, USD);

        let cart = fixture.cart()?;

        assert_eq!(cart.quantity_of("1"), Some(1));
        assert_eq!(cart.quantity_of("3"), Some(2));

        Ok(())
    }

    #[test]
    fn fixture_catalog_preserves_product_order() -> TestResult {
        let fixture = Fixture::from_set("scenario")?;
        let catalog = fixture.catalog()?;

        let ids: Vec<&str> = catalog.products().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["1", "2"]);

        Ok(())
    }

    #[test]
    fn fixture_loads_admin_records() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_admin("storefront")?;

        assert_eq!(fixture.admin_products().len(), 3);
        assert_eq!(fixture.admin_categories().len(), 3);

        Ok(())
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_missing_file_reports_path() {
        let mut fixture = Fixture::new();

        let result = fixture.load_products("does-not-exist");

        assert!(
            matches!(&result, Err(FixtureError::Io { path, .. }) if path.ends_with("products/does-not-exist.yml")),
            "expected Io error, got {result:?}"
        );
    }

    #[test]
    fn fixture_load_products_rejects_currency_mismatch() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "usd_set",
            "products:\n  - id: \"1\"\n    name: Funda\n    price: 10.00 USD\n    category: fundas\n    stock: 1\n",
        )?;

        write_fixture(
            dir.path(),
            "products",
            "eur_set",
            "products:\n  - id: \"2\"\n    name: Cargador\n    price: 10.00 EUR\n    category: cargadores\n    stock: 1\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("usd_set")?;

        let result = fixture.load_products("eur_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_load_products_rejects_duplicate_ids() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "dupes",
            "products:\n  - id: \"1\"\n    name: A\n    price: 1.00 USD\n    category: fundas\n    stock: 1\n  - id: \"1\"\n    name: B\n    price: 2.00 USD\n    category: fundas\n    stock: 1\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("dupes");

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(id)) if id == "1"));

        Ok(())
    }

    #[test]
    fn fixture_failed_product_file_leaves_fixture_unchanged() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "mixed",
            "products:\n  - id: \"1\"\n    name: Funda\n    price: 10.00 EUR\n    category: fundas\n    stock: 1\n  - id: \"2\"\n    name: Cable\n    price: 5.00 GBP\n    category: accesorios\n    stock: 1\n",
        )?;

        write_fixture(
            dir.path(),
            "products",
            "usd_set",
            "products:\n  - id: \"1\"\n    name: Funda\n    price: 10.00 USD\n    category: fundas\n    stock: 1\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));
        assert!(fixture.products().is_empty());
        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));

        // ids and currency from the failed file are not held against the next one
        fixture.load_products("usd_set")?;

        assert_eq!(fixture.products().len(), 1);
        assert_eq!(fixture.currency()?, USD);

        Ok(())
    }

    #[test]
    fn fixture_cart_rejects_unknown_products() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "shop",
            "products:\n  - id: \"1\"\n    name: A\n    price: 1.00 USD\n    category: fundas\n    stock: 1\n",
        )?;
        write_fixture(
            dir.path(),
            "carts",
            "shop",
            "items:\n  - product: \"404\"\n    quantity: 1\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("shop")?;

        let result = fixture.load_cart("shop");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(id)) if id == "404"));

        Ok(())
    }

    #[test]
    fn fixture_cart_rejects_zero_quantity() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "shop",
            "products:\n  - id: \"1\"\n    name: A\n    price: 1.00 USD\n    category: fundas\n    stock: 1\n",
        )?;
        write_fixture(
            dir.path(),
            "carts",
            "shop",
            "items:\n  - product: \"1\"\n    quantity: 0\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("shop")?.load_cart("shop")?;

        assert!(matches!(fixture.cart(), Err(FixtureError::Cart(_))));

        Ok(())
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert!(fixture.products.is_empty());
    }
}
