//! Tax evaluation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TaxError;
use super::types::{Recipient, TaxComponent, TaxKind, TaxSpec};

/// Tax charged by one component on one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTax {
    /// Component name.
    pub name: String,
    /// INTERNAL or EXTERNAL.
    pub kind: TaxKind,
    /// Who receives the amount.
    pub recipient: Recipient,
    /// Rate as a fraction.
    pub rate: Decimal,
    /// Base the rate was applied to.
    pub base: Decimal,
    /// Truncated tax amount.
    pub amount: Decimal,
}

/// Tax figures for a single unit of net pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTax {
    /// Net amount paid to the contractor.
    pub net: Decimal,
    /// First component's tax.
    pub tax_1: Decimal,
    /// Sum of every later component's tax.
    pub tax_2: Decimal,
    /// Full cost to the production.
    pub gross: Decimal,
    /// Ordered per-component breakdown.
    pub components: Vec<ComponentTax>,
}

impl UnitTax {
    /// Total tax across all components.
    #[must_use]
    pub fn total_tax(&self) -> Decimal {
        self.tax_1 + self.tax_2
    }

    /// Tax going to the given recipient.
    #[must_use]
    pub fn tax_for(&self, recipient: Recipient) -> Decimal {
        self.components
            .iter()
            .filter(|c| c.recipient == recipient)
            .map(|c| c.amount)
            .sum()
    }

    /// Scales every per-unit figure by `quantity`.
    #[must_use]
    pub fn times(&self, quantity: Decimal) -> LineTax {
        LineTax {
            net: self.net * quantity,
            tax_1: self.tax_1 * quantity,
            tax_2: self.tax_2 * quantity,
            gross: self.gross * quantity,
            budget_tax: self.tax_for(Recipient::Budget) * quantity,
            contractor_tax: self.tax_for(Recipient::Contractor) * quantity,
        }
    }
}

/// Tax figures for a quantity of units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTax {
    /// Net total.
    pub net: Decimal,
    /// First component total.
    pub tax_1: Decimal,
    /// Later components total.
    pub tax_2: Decimal,
    /// Gross total.
    pub gross: Decimal,
    /// Tax remitted by the production.
    pub budget_tax: Decimal,
    /// Tax paid through the contractor.
    pub contractor_tax: Decimal,
}

impl LineTax {
    /// Total tax across all components.
    #[must_use]
    pub fn total_tax(&self) -> Decimal {
        self.tax_1 + self.tax_2
    }
}

/// Stateless tax evaluator.
pub struct TaxEngine;

impl TaxEngine {
    /// Tax a single component charges on `base`, truncated to whole units.
    ///
    /// INTERNAL: `base * r / (1 - r)`. EXTERNAL: `base * r`.
    #[must_use]
    pub fn component_amount(base: Decimal, component: &TaxComponent) -> Decimal {
        let rate = component.rate();
        if rate.is_zero() || base.is_zero() {
            return Decimal::ZERO;
        }
        let raw = match component.kind() {
            TaxKind::Internal => base * rate / (Decimal::ONE - rate),
            TaxKind::External => base * rate,
        };
        raw.trunc()
    }

    /// Applies ordered components to one unit of net pay.
    ///
    /// Each component's tax is added to the running base before the next
    /// component is applied.
    #[must_use]
    pub fn apply(net: Decimal, components: &[TaxComponent]) -> UnitTax {
        let mut base = net;
        let mut breakdown = Vec::with_capacity(components.len());

        for component in components {
            let amount = Self::component_amount(base, component);
            breakdown.push(ComponentTax {
                name: component.name().to_string(),
                kind: component.kind(),
                recipient: component.recipient(),
                rate: component.rate(),
                base,
                amount,
            });
            base += amount;
        }

        let tax_1 = breakdown.first().map_or(Decimal::ZERO, |c| c.amount);
        let tax_2 = breakdown.iter().skip(1).map(|c| c.amount).sum();

        UnitTax {
            net,
            tax_1,
            tax_2,
            gross: base,
            components: breakdown,
        }
    }

    /// Evaluates a tax specification for one unit.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` if a fixed-type percentage is invalid.
    pub fn per_unit(net: Decimal, spec: &TaxSpec) -> Result<UnitTax, TaxError> {
        Ok(Self::apply(net, &spec.components()?))
    }

    /// Evaluates a tax specification for `quantity` units.
    ///
    /// Per-unit taxes are truncated before the multiplication.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` if a fixed-type percentage is invalid.
    pub fn line(net: Decimal, quantity: Decimal, spec: &TaxSpec) -> Result<LineTax, TaxError> {
        Ok(Self::per_unit(net, spec)?.times(quantity))
    }
}
