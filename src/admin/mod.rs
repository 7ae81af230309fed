//! Admin
//!
//! The admin dashboard: product and category forms, submission to an [`AdminStore`], search and
//! summary figures. Submissions never change the listed records.

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::text::{contains_folded, fold};

pub mod dashboard;
pub mod forms;

pub use dashboard::{DashboardStats, LOW_STOCK_THRESHOLD, StockLevel};
pub use forms::{
    COLOR_OPTIONS, CategoryForm, CategoryRecord, Condition, ProductForm, ProductLine,
    ProductRecord, Storage, UnknownOption,
};

/// Errors raised by admin form submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field is malformed or negative.
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber {
        /// Form field
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// A select field holds a value outside its options.
    #[error("{field} is not a valid option: {value:?}")]
    InvalidOption {
        /// Form field
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// The store refused the record.
    #[error("failed to save: {0}")]
    Store(String),
}

/// Destination for submitted admin records.
#[cfg_attr(test, automock)]
pub trait AdminStore {
    /// Persist a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the record cannot be saved.
    fn save_product(&mut self, product: &ProductRecord) -> Result<(), AdminError>;

    /// Persist a category.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] if the record cannot be saved.
    fn save_category(&mut self, category: &CategoryRecord) -> Result<(), AdminError>;
}

/// Store that logs each record and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAdminStore;

impl AdminStore for LoggingAdminStore {
    fn save_product(&mut self, product: &ProductRecord) -> Result<(), AdminError> {
        info!(?product, "saved product");

        Ok(())
    }

    fn save_category(&mut self, category: &CategoryRecord) -> Result<(), AdminError> {
        info!(?category, "saved category");

        Ok(())
    }
}

/// Create/edit dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdminDialog {
    /// Not shown
    #[default]
    Closed,

    /// Creating a new record
    Creating,

    /// Editing the record with this id
    Editing(String),
}

impl AdminDialog {
    /// Whether the dialog is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, AdminDialog::Closed)
    }
}

/// Admin dashboard state over a fixed set of records.
#[derive(Debug)]
pub struct AdminPanel<S> {
    store: S,
    products: Vec<ProductRecord>,
    categories: Vec<CategoryRecord>,
    product_dialog: AdminDialog,
    category_dialog: AdminDialog,
    search_term: String,
}

impl<S: AdminStore> AdminPanel<S> {
    /// Panel with no records.
    pub fn new(store: S) -> Self {
        Self::with_records(store, Vec::new(), Vec::new())
    }

    /// Panel listing the given records.
    pub fn with_records(
        store: S,
        products: Vec<ProductRecord>,
        categories: Vec<CategoryRecord>,
    ) -> Self {
        Self {
            store,
            products,
            categories,
            product_dialog: AdminDialog::Closed,
            category_dialog: AdminDialog::Closed,
            search_term: String::new(),
        }
    }

    /// Open the product dialog with an empty form.
    pub fn create_product(&mut self) -> ProductForm {
        self.product_dialog = AdminDialog::Creating;

        ProductForm::default()
    }

    /// Open the product dialog pre-filled with the product `id`.
    ///
    /// Returns `None`, leaving the dialog as it was, if no product has that id.
    pub fn edit_product(&mut self, id: &str) -> Option<ProductForm> {
        let record = self
            .products
            .iter()
            .find(|product| product.id.as_deref() == Some(id))?;

        let form = ProductForm::from_record(record);

        self.product_dialog = AdminDialog::Editing(id.to_string());

        Some(form)
    }

    /// Open the category dialog with an empty form.
    pub fn create_category(&mut self) -> CategoryForm {
        self.category_dialog = AdminDialog::Creating;

        CategoryForm::default()
    }

    /// Open the category dialog pre-filled with the category `id`.
    ///
    /// Returns `None`, leaving the dialog as it was, if no category has that id.
    pub fn edit_category(&mut self, id: &str) -> Option<CategoryForm> {
        let record = self
            .categories
            .iter()
            .find(|category| category.id.as_deref() == Some(id))?;

        let form = CategoryForm::from_record(record);

        self.category_dialog = AdminDialog::Editing(id.to_string());

        Some(form)
    }

    /// Close both dialogs without submitting.
    pub fn cancel(&mut self) {
        self.product_dialog = AdminDialog::Closed;
        self.category_dialog = AdminDialog::Closed;
    }

    /// Validate `form` and hand the record to the store, then close the product dialog.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if validation or the store fails. The dialog stays open and the
    /// store is not called for invalid input.
    #[tracing::instrument(
        name = "admin.submit_product",
        skip(self, form),
        fields(product_name = %form.name),
        err
    )]
    pub fn submit_product(&mut self, form: &ProductForm) -> Result<ProductRecord, AdminError> {
        let record = form.validate()?;

        self.store.save_product(&record)?;

        self.product_dialog = AdminDialog::Closed;

        Ok(record)
    }

    /// Validate `form` and hand the record to the store, then close the category dialog.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if validation or the store fails. The dialog stays open and the
    /// store is not called for invalid input.
    #[tracing::instrument(
        name = "admin.submit_category",
        skip(self, form),
        fields(category_name = %form.name),
        err
    )]
    pub fn submit_category(&mut self, form: &CategoryForm) -> Result<CategoryRecord, AdminError> {
        let record = form.validate()?;

        self.store.save_category(&record)?;

        self.category_dialog = AdminDialog::Closed;

        Ok(record)
    }

    /// Set the dashboard search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Products whose name or description contains the search term.
    pub fn filtered_products(&self) -> Vec<&ProductRecord> {
        let needle = fold(self.search_term.trim());

        self.products
            .iter()
            .filter(|p| contains_folded(&p.name, &needle) || contains_folded(&p.description, &needle))
            .collect()
    }

    /// Categories whose name or description contains the search term.
    pub fn filtered_categories(&self) -> Vec<&CategoryRecord> {
        let needle = fold(self.search_term.trim());

        self.categories
            .iter()
            .filter(|c| contains_folded(&c.name, &needle) || contains_folded(&c.description, &needle))
            .collect()
    }

    /// Dashboard figures over every record, ignoring the search term.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.products, &self.categories)
    }

    /// Product dialog state.
    pub fn product_dialog(&self) -> &AdminDialog {
        &self.product_dialog
    }

    /// Category dialog state.
    pub fn category_dialog(&self) -> &AdminDialog {
        &self.category_dialog
    }

    /// Listed products.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Listed categories.
    pub fn categories(&self) -> &[CategoryRecord] {
        &self.categories
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
