//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::discounts::{Discount, DiscountError};

/// Errors that can occur while calculating prices and totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Discount could not be applied.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A line total overflowed minor units.
    #[error("line total overflowed: {quantity} x {unit_minor} minor units")]
    LineOverflow {
        /// Unit price in minor units
        unit_minor: i64,
        /// Quantity requested
        quantity: u32,
    },
}

/// Calculates the price of a product after its percentage discount.
///
/// # Errors
///
/// Returns [`PricingError::Discount`] if the discounted amount overflows.
pub fn discounted_price<'a>(
    price: &Money<'a, Currency>,
    discount: Discount,
) -> Result<Money<'a, Currency>, PricingError> {
    if discount.is_none() {
        return Ok(*price);
    }

    let minor = discount.apply_to_minor(price.to_minor_units())?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Calculates `unit * quantity`.
///
/// # Errors
///
/// Returns [`PricingError::LineOverflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    unit: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let unit_minor = unit.to_minor_units();

    let total = unit_minor
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::LineOverflow {
            unit_minor,
            quantity,
        })?;

    Ok(Money::from_minor(total, unit.currency()))
}

/// Sums amounts, starting from zero in `currency`.
///
/// # Errors
///
/// Returns [`PricingError::Money`] if an amount is in a different currency.
pub fn total_price<'a>(
    amounts: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let total = amounts
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, amount| acc.add(amount))?;

    Ok(total)
}
