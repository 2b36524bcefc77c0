//! Type-safe price representation using decimal arithmetic.
//!
//! Menu markup displays prices as `$`-prefixed markers (e.g. `$8.50`), and
//! the add-to-cart wiring posts that marker back verbatim, so parsing and
//! formatting are both anchored on the `$` prefix. The store sells in a
//! single display currency.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The marker string did not start with `$`.
    #[error("price marker must start with '$': {0:?}")]
    MissingMarker(String),

    /// The amount after the marker is not a decimal number.
    #[error("price amount is not a decimal: {0:?}")]
    InvalidAmount(String),

    /// Prices cannot go below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of money.
///
/// Serializes as a plain JSON number, matching the persisted cart format.
/// Deserialization is unchecked; cart loading validates the non-negative
/// invariant and discards blobs that violate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Parse a `$`-prefixed price marker such as `$8.50`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `$` prefix is missing, the amount does not
    /// parse as a decimal, or the amount is negative.
    pub fn parse_marker(marker: &str) -> Result<Self, PriceError> {
        let raw = marker.trim();
        let amount = raw
            .strip_prefix('$')
            .ok_or_else(|| PriceError::MissingMarker(raw.to_string()))?;
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(raw.to_string()))?;
        Self::new(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a line quantity.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }

    /// Whether the amount upholds the non-negative invariant.
    ///
    /// Needed after deserialization, which accepts any number.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        !self.0.is_sign_negative() || self.0.is_zero()
    }
}

impl fmt::Display for Price {
    /// Formats as a marker with two decimal places (e.g. `$8.50`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
