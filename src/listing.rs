//! Listing
//!
//! The catalog page's result list: filtered, then sorted, plus plain-text table output.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    filters::{FilterConfig, filter_products},
    pricing::PricingError,
    products::Product,
    sorting::{SortKey, sort_products},
};

/// Shown instead of the table when no product passes the filters.
pub const EMPTY_LISTING_LABEL: &str = "No se encontraron productos";

/// Errors that can occur when printing a listing.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A discounted price could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The listing could not be written.
    #[error("failed to write catalog listing")]
    IO,
}

/// Products passing a filter configuration, in sort order.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'c, 'a> {
    products: Vec<&'c Product<'a>>,
    sort: SortKey,
}

impl<'c, 'a> CatalogView<'c, 'a> {
    /// Filter `catalog` with `filters`, then order the survivors by `sort`.
    pub fn build(catalog: &'c Catalog<'a>, filters: &FilterConfig, sort: SortKey) -> Self {
        let filtered = filter_products(catalog, filters);

        Self {
            products: sort_products(&filtered, sort),
            sort,
        }
    }

    /// Products in display order.
    pub fn products(&self) -> &[&'c Product<'a>] {
        &self.products
    }

    /// Iterate over products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &'c Product<'a>> + '_ {
        self.products.iter().copied()
    }

    /// Order applied to this view.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Number of products shown.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no product passed the filters.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Result count as shown above the grid, e.g. `1 producto` or `12 productos`.
    pub fn count_label(&self) -> String {
        match self.len() {
            1 => "1 producto".to_string(),
            n => format!("{n} productos"),
        }
    }
}

/// Prints `view` as a table followed by the result count.
///
/// # Errors
///
/// Returns [`RenderError::Pricing`] if a discounted price overflows, or [`RenderError::IO`] if
/// writing fails.
pub fn write_listing(mut out: impl io::Write, view: &CatalogView<'_, '_>) -> Result<(), RenderError> {
    if view.is_empty() {
        return writeln!(out, "{EMPTY_LISTING_LABEL}").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Producto", "Categoría", "Precio", "Oferta", "Stock"]);

    for (idx, product) in view.iter().enumerate() {
        let offer = if product.has_discount() {
            format!("{} (-{}%)", product.discounted_price()?, product.discount.percent())
        } else {
            String::new()
        };

        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            product.category.label().to_string(),
            format!("{}", product.price),
            offer,
            product.stock_status().label().to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Columns::new(3..5), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "\n{table}").map_err(|_err| RenderError::IO)?;
    writeln!(out, " {}", view.count_label()).map_err(|_err| RenderError::IO)?;

    Ok(())
}
