//! Delivery fee, tax and the derived totals of a cart.

use super::LedgerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BASIS_POINTS_PER_UNIT: u32 = 10_000;

/// Tax rate held in basis points (1/100 of a percent) so rounding stays in
/// integers.
///
/// Deserializes from, and serializes to, a fraction: `0.05` is 500 basis
/// points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate {
    basis_points: u32,
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("tax rate must be a fraction between 0 and 1, got {0}")]
pub struct InvalidTaxRate(pub f64);

impl TaxRate {
    pub fn from_basis_points(basis_points: u32) -> Result<Self, InvalidTaxRate> {
        if basis_points > BASIS_POINTS_PER_UNIT {
            return Err(InvalidTaxRate(
                f64::from(basis_points) / f64::from(BASIS_POINTS_PER_UNIT),
            ));
        }
        Ok(Self { basis_points })
    }

    /// Parses a fraction such as `0.05`, rounded to the nearest basis point.
    pub fn from_fraction(rate: f64) -> Result<Self, InvalidTaxRate> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(InvalidTaxRate(rate));
        }
        Ok(Self {
            basis_points: (rate * f64::from(BASIS_POINTS_PER_UNIT)).round() as u32,
        })
    }

    pub fn basis_points(self) -> u32 {
        self.basis_points
    }

    pub fn as_fraction(self) -> f64 {
        f64::from(self.basis_points) / f64::from(BASIS_POINTS_PER_UNIT)
    }

    /// Tax on `amount`, rounded half up.
    pub fn apply(self, amount: u64) -> u64 {
        let scaled = u128::from(amount) * u128::from(self.basis_points)
            + u128::from(BASIS_POINTS_PER_UNIT / 2);
        // Never exceeds `amount`, so it fits back into u64.
        (scaled / u128::from(BASIS_POINTS_PER_UNIT)) as u64
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self { basis_points: 500 }
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = InvalidTaxRate;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::from_fraction(rate)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> Self {
        rate.as_fraction()
    }
}

/// Pricing knobs applied when totals are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub delivery_fee: u64,
    pub tax_rate: TaxRate,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            delivery_fee: 20,
            tax_rate: TaxRate::default(),
        }
    }
}

impl PricingConfig {
    pub fn totals_for(&self, subtotal: u64) -> Result<Totals, LedgerError> {
        let taxes = self.tax_rate.apply(subtotal);
        let total = subtotal
            .checked_add(self.delivery_fee)
            .and_then(|sum| sum.checked_add(taxes))
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(Totals {
            subtotal,
            delivery_fee: self.delivery_fee,
            taxes,
            total,
        })
    }
}

/// Derived amounts. Always recomputed, never stored on a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub taxes: u64,
    pub total: u64,
}
