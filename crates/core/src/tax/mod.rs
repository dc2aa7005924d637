//! Tax schemes and per-unit tax evaluation.
//!
//! A tax specification is evaluated against a single unit of net pay:
//! - Components apply in `sort_order` on a running base that starts at net
//! - INTERNAL components are grossed up from the base
//! - EXTERNAL components are charged on top of the base
//! - Every component amount is truncated to whole units before it grows the base
//!
//! Line amounts multiply the truncated per-unit figures by quantity.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{ComponentTax, LineTax, TaxEngine, UnitTax};
pub use error::TaxError;
pub use types::{FixedTaxType, Recipient, TaxComponent, TaxKind, TaxScheme, TaxSpec};
