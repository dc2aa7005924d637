//! Budget line calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::types::{BudgetLine, BudgetTree};
use crate::tax::{TaxEngine, TaxError, TaxScheme, TaxSpec};

/// Plan and fact figures of one budget line, rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Planned net.
    pub plan_net: Decimal,
    /// Planned first tax.
    pub plan_tax_1: Decimal,
    /// Planned later taxes.
    pub plan_tax_2: Decimal,
    /// Planned gross without overtime.
    pub plan_gross: Decimal,
    /// Planned overtime gross.
    pub plan_ot_gross: Decimal,
    /// Planned gross plus overtime.
    pub plan_total: Decimal,
    /// Actual net.
    pub fact_net: Decimal,
    /// Actual first tax.
    pub fact_tax_1: Decimal,
    /// Actual later taxes.
    pub fact_tax_2: Decimal,
    /// Actual gross without overtime.
    pub fact_gross: Decimal,
    /// Actual overtime gross.
    pub fact_ot_gross: Decimal,
    /// Actual gross plus overtime.
    pub fact_total: Decimal,
    /// Planned tax remitted by the production.
    pub plan_budget_tax: Decimal,
    /// Planned tax paid through the contractor.
    pub plan_contractor_tax: Decimal,
}

impl LineTotals {
    /// Planned tax across all components.
    #[must_use]
    pub fn plan_tax(&self) -> Decimal {
        self.plan_tax_1 + self.plan_tax_2
    }

    /// Actual tax across all components.
    #[must_use]
    pub fn fact_tax(&self) -> Decimal {
        self.fact_tax_1 + self.fact_tax_2
    }
}

/// Budget service for line math.
pub struct BudgetService;

impl BudgetService {
    /// Computes plan and fact totals for a line under the given tax specification.
    ///
    /// Overtime only applies to shift and day units with a positive overtime
    /// rate. Its gross is `per_unit(ot_rate).gross * hours * shifts` and is
    /// added to the line total as a separate term.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` if a fixed-type percentage is invalid.
    pub fn line_totals(line: &BudgetLine, spec: &TaxSpec) -> Result<LineTotals, TaxError> {
        let components = spec.components()?;
        let per_unit = TaxEngine::apply(line.rate, &components);
        let plan = per_unit.times(line.qty_plan);
        let fact = per_unit.times(line.qty_fact);

        let (ot_plan, ot_fact) = if line.unit.allows_overtime() && line.ot_rate > Decimal::ZERO {
            let ot_unit = TaxEngine::apply(line.ot_rate, &components);
            (
                ot_unit.gross * line.ot_hours_plan * line.ot_shifts_plan,
                ot_unit.gross * line.ot_hours_fact * line.ot_shifts_fact,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Ok(LineTotals {
            plan_net: plan.net.round_dp(2),
            plan_tax_1: plan.tax_1.round_dp(2),
            plan_tax_2: plan.tax_2.round_dp(2),
            plan_gross: plan.gross.round_dp(2),
            plan_ot_gross: ot_plan.round_dp(2),
            plan_total: (plan.gross + ot_plan).round_dp(2),
            fact_net: fact.net.round_dp(2),
            fact_tax_1: fact.tax_1.round_dp(2),
            fact_tax_2: fact.tax_2.round_dp(2),
            fact_gross: fact.gross.round_dp(2),
            fact_ot_gross: ot_fact.round_dp(2),
            fact_total: (fact.gross + ot_fact).round_dp(2),
            plan_budget_tax: plan.budget_tax.round_dp(2),
            plan_contractor_tax: plan.contractor_tax.round_dp(2),
        })
    }

    /// Computes line totals, resolving the line's tax configuration against `schemes`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTax` if the line's tax configuration is invalid.
    pub fn totals_for(line: &BudgetLine, schemes: &[TaxScheme]) -> Result<LineTotals, BudgetError> {
        Self::line_totals(line, &line.tax_spec(schemes)).map_err(|source| {
            BudgetError::InvalidTax {
                line: line.id,
                source,
            }
        })
    }

    /// Sums the planned totals of every line in the tree.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTax` for the first line that cannot be evaluated.
    pub fn project_plan_total(tree: &BudgetTree, schemes: &[TaxScheme]) -> Result<Decimal, BudgetError> {
        tree.lines()
            .map(|line| Self::totals_for(line, schemes).map(|t| t.plan_total))
            .sum()
    }
}
