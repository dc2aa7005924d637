//! Limit deltas and limit snapshots.

use filmbudget_shared::types::LineId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::BudgetTree;
use crate::tax::TaxScheme;

/// Percentage by which `value` deviates from `limit`, rounded to one decimal.
///
/// `(value / limit - 1) * 100`. Returns `None` when there is no limit or the
/// limit is zero.
#[must_use]
pub fn limit_delta(value: Decimal, limit: Option<Decimal>) -> Option<Decimal> {
    let limit = limit.filter(|l| !l.is_zero())?;
    let pct = (value / limit - Decimal::ONE) * Decimal::ONE_HUNDRED;
    Some(pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

/// Formats the limit delta with an explicit sign and one decimal (`+10.0%`).
///
/// Empty when there is no limit.
#[must_use]
pub fn format_limit_pct(value: Decimal, limit: Option<Decimal>) -> String {
    let Some(pct) = limit_delta(value, limit) else {
        return String::new();
    };
    let sign = if pct < Decimal::ZERO { '-' } else { '+' };
    let mut magnitude = pct.abs();
    magnitude.rescale(1);
    format!("{sign}{magnitude}%")
}

/// Proposed limit for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitEntry {
    /// Line ID.
    pub line_id: LineId,
    /// Line name.
    pub name: String,
    /// Limit currently stored on the line.
    pub current: Option<Decimal>,
    /// Limit "save limit" would store: the planned total.
    pub proposed: Decimal,
}

impl LimitEntry {
    /// Whether saving would change the stored limit.
    #[must_use]
    pub fn changes(&self) -> bool {
        self.current != Some(self.proposed)
    }
}

/// Preview of the "save limit" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSnapshot {
    /// One entry per line, in tree order.
    pub entries: Vec<LimitEntry>,
}

impl LimitSnapshot {
    /// Captures the planned total of every line as its new limit.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTax` if a line cannot be evaluated.
    pub fn capture(tree: &BudgetTree, schemes: &[TaxScheme]) -> Result<Self, BudgetError> {
        let entries = tree
            .lines()
            .map(|line| {
                BudgetService::totals_for(line, schemes).map(|totals| LimitEntry {
                    line_id: line.id,
                    name: line.name.clone(),
                    current: line.limit_amount,
                    proposed: totals.plan_total,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Sum of proposed limits.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.proposed).sum()
    }

    /// Number of lines whose limit would change.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.entries.iter().filter(|e| e.changes()).count()
    }
}
