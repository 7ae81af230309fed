//! Discounts

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscountError {
    /// The percentage is above 100.
    #[error("discount of {0}% is out of range; expected 0 to 100")]
    OutOfRange(u8),

    /// The discounted amount could not be represented in minor units.
    #[error("discounted amount overflowed")]
    Overflow,
}

/// Whole-number percentage taken off a product's base price.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount(0);

    /// Create a discount of `percent` percent.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] if `percent` is above 100.
    pub fn new(percent: u8) -> Result<Self, DiscountError> {
        if percent > 100 {
            return Err(DiscountError::OutOfRange(percent));
        }

        Ok(Self(percent))
    }

    /// The percentage taken off.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Whether this discount leaves the price unchanged.
    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Apply the discount to an amount in minor units.
    ///
    /// The result is `minor * (100 - percent) / 100`, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::Overflow`] if the result does not fit in an `i64`.
    pub fn apply_to_minor(self, minor: i64) -> Result<i64, DiscountError> {
        if self.is_none() {
            return Ok(minor);
        }

        let Some(minor) = Decimal::from_i64(minor) else {
            return Err(DiscountError::Overflow);
        };

        let remaining = Decimal::from(100_u8.saturating_sub(self.0));

        let applied = minor
            .checked_mul(remaining)
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(DiscountError::Overflow)?;

        applied
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(DiscountError::Overflow)
    }
}

impl TryFrom<u8> for Discount {
    type Error = DiscountError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<Discount> for u8 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}
