//! Cart Summary

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLedger, CartLine},
    catalog::Catalog,
    pricing::PricingError,
};

/// Shown instead of the table when the cart has no entries.
pub const EMPTY_CART_LABEL: &str = "Carrito vacío";

/// Shipping is never priced in the storefront.
pub const SHIPPING_LABEL: &str = "Calculado al finalizar";

/// Errors that can occur when building or printing a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Prices could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The summary could not be written.
    #[error("failed to write cart summary")]
    IO,
}

/// Priced snapshot of a cart.
#[derive(Debug, Clone)]
pub struct CartSummary<'c, 'a> {
    lines: Vec<CartLine<'c, 'a>>,
    subtotal: Money<'a, Currency>,
    item_count: u64,
}

impl<'c, 'a> CartSummary<'c, 'a> {
    /// Price every entry of `cart` against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError::Pricing`] if an amount cannot be represented.
    pub fn from_ledger(cart: &CartLedger, catalog: &'c Catalog<'a>) -> Result<Self, SummaryError> {
        let lines = cart.lines(catalog)?;
        let subtotal = cart.subtotal(catalog)?;

        Ok(Self {
            lines,
            subtotal,
            item_count: cart.item_count(),
        })
    }

    /// Priced lines, in cart order.
    pub fn lines(&self) -> &[CartLine<'c, 'a>] {
        &self.lines
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Amount due. Shipping is settled at checkout so this equals the subtotal.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Units across all entries, including ones missing from the catalog.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Prints the summary table followed by subtotal, shipping and total lines.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.is_empty() {
            return writeln!(out, "{EMPTY_CART_LABEL}").map_err(|_err| SummaryError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Producto", "Precio", "Cantidad", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.product.name.clone(),
                format!("{}", line.unit_price),
                line.quantity.to_string(),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();

        table.with(theme);
        table.modify(Columns::new(2..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)?;

        writeln!(out, " Subtotal: {}", self.subtotal).map_err(|_err| SummaryError::IO)?;
        writeln!(out, " Envío:    {SHIPPING_LABEL}").map_err(|_err| SummaryError::IO)?;
        writeln!(out, " Total:    {}", self.total()).map_err(|_err| SummaryError::IO)?;

        Ok(())
    }
}
