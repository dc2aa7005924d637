//! Tax error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building a tax specification.
///
/// Evaluation itself never fails once the components exist, so every
/// variant here describes a rate or type that cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxError {
    /// Rates are fractions of the base and cannot be negative.
    #[error("Tax rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    /// An INTERNAL rate of 1 or more would need an infinite gross-up.
    #[error("Internal tax rate must be below 1, got {0}")]
    InternalRateOutOfRange(Decimal),

    /// An EXTERNAL rate above 1 charges more tax than the base itself.
    #[error("External tax rate must not exceed 1, got {0}")]
    ExternalRateOutOfRange(Decimal),

    /// Fixed tax types take percentages between 0 and 100.
    #[error("Tax percentage out of range: {0}")]
    PercentOutOfRange(Decimal),

    /// Tax type label not recognised.
    #[error("Unknown tax type: {0}")]
    UnknownTaxType(String),
}
