//! Contractors.

use filmbudget_shared::types::{ContractorId, Currency, TaxSchemeId};
use serde::{Deserialize, Serialize};

/// Legal form of a contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractorType {
    /// Individual.
    Fl,
    /// Self-employed.
    Sz,
    /// Sole trader.
    Ip,
    /// Limited company.
    Ooo,
}

impl ContractorType {
    /// Length of a valid taxpayer number for this legal form.
    ///
    /// Companies have 10 digits, everyone else 12.
    #[must_use]
    pub const fn inn_length(self) -> usize {
        match self {
            Self::Ooo => 10,
            Self::Fl | Self::Sz | Self::Ip => 12,
        }
    }
}

/// A person or company paid from the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    /// Contractor ID.
    pub id: ContractorId,
    /// Full name or company name.
    pub full_name: String,
    /// Legal form.
    #[serde(rename = "type")]
    pub contractor_type: ContractorType,
    /// Taxpayer number.
    #[serde(default)]
    pub inn: Option<String>,
    /// Phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// E-mail.
    #[serde(default)]
    pub email: Option<String>,
    /// Payment currency.
    #[serde(default)]
    pub currency: Currency,
    /// Default tax scheme.
    #[serde(default)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Telegram account used by the reporting bot.
    #[serde(default)]
    pub telegram_id: Option<String>,
    /// Passport data is on file (never returned in lists).
    #[serde(default)]
    pub has_passport: bool,
    /// Bank details are on file (never returned in lists).
    #[serde(default)]
    pub has_bank_details: bool,
}
