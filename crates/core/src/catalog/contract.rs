//! Contracts between the production and contractors.

use chrono::NaiveDate;
use filmbudget_shared::types::{ContractId, ContractorId, Currency, LineId, ProjectId, TaxSchemeId};
use serde::{Deserialize, Serialize};

/// How a contract is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Monthly salary.
    Salary,
    /// Paid per shift worked.
    PerShift,
    /// Paid per period (see `payment_period`).
    Periodic,
}

/// Contract lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractStatus {
    /// Not signed yet.
    #[default]
    Draft,
    /// In force.
    Active,
    /// Finished.
    Closed,
}

/// A contract, optionally linked to budget lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract ID.
    pub id: ContractId,
    /// Contract number.
    pub number: String,
    /// Project.
    pub project_id: ProjectId,
    /// Contractor.
    pub contractor_id: ContractorId,
    /// Contractor name, resolved by the backend.
    #[serde(default)]
    pub contractor_name: Option<String>,
    /// Payment type.
    pub payment_type: PaymentType,
    /// Period for periodic payments.
    #[serde(default)]
    pub payment_period: Option<String>,
    /// Contract currency.
    #[serde(default)]
    pub currency: Currency,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ContractStatus,
    /// Signature date.
    #[serde(default)]
    pub signed_at: Option<NaiveDate>,
    /// First valid date.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Last valid date.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// Tax scheme agreed in the contract.
    #[serde(default)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Whether the contract scheme overrides the contractor's.
    #[serde(default)]
    pub tax_override: bool,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Linked budget lines.
    #[serde(default)]
    pub budget_line_ids: Vec<LineId>,
}

impl Contract {
    /// Whether the contract is valid on `date`; open ends are unbounded.
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= date) && self.valid_to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Contract {
        Contract {
            id: ContractId::new(),
            number: "Д-1".into(),
            project_id: ProjectId::new(),
            contractor_id: ContractorId::new(),
            contractor_name: None,
            payment_type: PaymentType::PerShift,
            payment_period: None,
            currency: Currency::Rub,
            status: ContractStatus::Active,
            signed_at: None,
            valid_from: from,
            valid_to: to,
            tax_scheme_id: None,
            tax_override: false,
            notes: None,
            budget_line_ids: vec![],
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_covers_inclusive_window() {
        let c = contract(Some(date(10)), Some(date(20)));

        assert!(c.covers(date(10)));
        assert!(c.covers(date(20)));
        assert!(!c.covers(date(9)));
        assert!(!c.covers(date(21)));
    }

    #[test]
    fn test_covers_open_ends() {
        assert!(contract(None, None).covers(date(1)));
        assert!(contract(Some(date(5)), None).covers(date(31)));
    }

    #[test]
    fn test_payment_type_wire_names() {
        let json = serde_json::to_string(&PaymentType::PerShift).unwrap();
        assert_eq!(json, "\"PER_SHIFT\"");
    }
}
