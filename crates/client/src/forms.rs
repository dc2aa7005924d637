//! Form payloads and their validation.
//!
//! Each form is both the request body sent to the backend and the unit of
//! local validation. Field rules are declared with `garde`; rules spanning
//! several fields live in each form's `check`.

use chrono::{NaiveDate, NaiveTime};
use filmbudget_core::budget::UnitType;
use filmbudget_core::catalog::{ContractStatus, ContractorType, PaymentType, ProjectParam};
use filmbudget_core::production::{EntrySource, ReportStatus};
use filmbudget_core::tax::{Recipient, TaxComponent, TaxError, TaxKind};
use filmbudget_shared::types::{
    CategoryId, ContractId, ContractorId, Currency, LineId, ProjectId, SubcategoryId, TaxSchemeId,
};
use garde::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

// ============================================================================
// Validators
// ============================================================================

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("обязательное поле"));
    }
    Ok(())
}

fn non_negative(value: &Decimal, _ctx: &()) -> garde::Result {
    if *value < Decimal::ZERO {
        return Err(garde::Error::new("не может быть отрицательным"));
    }
    Ok(())
}

fn fraction(value: &Decimal, _ctx: &()) -> garde::Result {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        return Err(garde::Error::new("ставка должна быть от 0 до 1"));
    }
    Ok(())
}

#[allow(clippy::ref_option)]
fn required<T>(value: &Option<T>, _ctx: &()) -> garde::Result {
    if value.is_none() {
        return Err(garde::Error::new("обязательное поле"));
    }
    Ok(())
}

/// Taxpayer numbers have 10 digits for companies and 12 for everyone else.
#[allow(clippy::ref_option)]
fn inn_digits(value: &Option<String>, _ctx: &()) -> garde::Result {
    let Some(inn) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    if !inn.chars().all(|c| c.is_ascii_digit()) || !matches!(inn.len(), 10 | 12) {
        return Err(garde::Error::new("ИНН должен содержать 10 или 12 цифр"));
    }
    Ok(())
}

fn dates_in_order(start: Option<NaiveDate>, end: Option<NaiveDate>, what: &str) -> ClientResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ClientError::Invalid(format!(
            "{what}: дата окончания раньше даты начала"
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// Projects
// ============================================================================

/// Project create/update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProjectForm {
    /// Project name.
    #[garde(custom(not_blank), length(max = 255))]
    pub name: String,
    /// Start of production.
    #[garde(skip)]
    pub start_date: Option<NaiveDate>,
    /// End of production.
    #[garde(skip)]
    pub end_date: Option<NaiveDate>,
    /// Budget currency.
    #[garde(skip)]
    pub currency: Currency,
    /// Free-form parameters.
    #[garde(skip)]
    #[serde(default)]
    pub params: Vec<ProjectParam>,
}

impl ProjectForm {
    /// Validates fields and the date range.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` or `ClientError::Invalid`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        dates_in_order(self.start_date, self.end_date, "Проект")
    }
}

// ============================================================================
// Budget structure
// ============================================================================

/// Category create/rename form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    /// Category name.
    #[garde(custom(not_blank))]
    pub name: String,
    /// Position within the budget.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl CategoryForm {
    /// Validates fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// Subcategory create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubcategoryForm {
    /// Owning category.
    #[garde(skip)]
    pub category_id: CategoryId,
    /// Subcategory name.
    #[garde(custom(not_blank))]
    pub name: String,
    /// Position within the category.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl SubcategoryForm {
    /// Validates fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// New budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LineForm {
    /// Owning subcategory.
    #[garde(skip)]
    pub subcategory_id: SubcategoryId,
    /// Line name.
    #[garde(custom(not_blank))]
    pub name: String,
    /// Linked contractor.
    #[garde(skip)]
    pub contractor_id: Option<ContractorId>,
    /// Free-text contractor name.
    #[garde(skip)]
    pub contractor_name: Option<String>,
    /// Pricing unit.
    #[garde(skip)]
    pub unit: UnitType,
    /// Net rate.
    #[garde(custom(non_negative))]
    pub rate: Decimal,
    /// Planned quantity.
    #[garde(custom(non_negative))]
    pub qty_plan: Decimal,
    /// Actual quantity.
    #[garde(custom(non_negative))]
    pub qty_fact: Decimal,
    /// First working date.
    #[garde(skip)]
    pub date_start: Option<NaiveDate>,
    /// Last working date.
    #[garde(skip)]
    pub date_end: Option<NaiveDate>,
    /// Tax scheme.
    #[garde(skip)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Note.
    #[garde(skip)]
    pub note: Option<String>,
    /// Position within the subcategory.
    #[garde(skip)]
    pub order_index: i32,
}

impl LineForm {
    /// Blank line named `name` in `subcategory_id`.
    #[must_use]
    pub fn new(subcategory_id: SubcategoryId, name: impl Into<String>) -> Self {
        Self {
            subcategory_id,
            name: name.into(),
            contractor_id: None,
            contractor_name: None,
            unit: UnitType::default(),
            rate: Decimal::ZERO,
            qty_plan: Decimal::ZERO,
            qty_fact: Decimal::ZERO,
            date_start: None,
            date_end: None,
            tax_scheme_id: None,
            note: None,
            order_index: 0,
        }
    }

    /// Validates fields and the date range.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` or `ClientError::Invalid`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        dates_in_order(self.date_start, self.date_end, "Статья")
    }
}

// ============================================================================
// Contractors
// ============================================================================

/// Contractor create/update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContractorForm {
    /// Full name or company name.
    #[garde(custom(not_blank), length(max = 500))]
    pub full_name: String,
    /// Legal form.
    #[garde(skip)]
    #[serde(rename = "type")]
    pub contractor_type: ContractorType,
    /// Taxpayer number.
    #[garde(custom(inn_digits))]
    pub inn: Option<String>,
    /// Phone.
    #[garde(skip)]
    pub phone: Option<String>,
    /// E-mail.
    #[garde(email)]
    pub email: Option<String>,
    /// Payment currency.
    #[garde(skip)]
    pub currency: Currency,
    /// Default tax scheme.
    #[garde(skip)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Telegram account.
    #[garde(skip)]
    pub telegram_id: Option<String>,
    /// Passport data; write-only.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_data: Option<String>,
    /// Bank details; write-only.
    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<String>,
}

impl ContractorForm {
    /// Empty form for a contractor of the given legal form.
    #[must_use]
    pub fn new(full_name: impl Into<String>, contractor_type: ContractorType) -> Self {
        Self {
            full_name: full_name.into(),
            contractor_type,
            inn: None,
            phone: None,
            email: None,
            currency: Currency::default(),
            tax_scheme_id: None,
            telegram_id: None,
            passport_data: None,
            bank_details: None,
        }
    }

    /// Validates fields and that the INN length fits the legal form.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` or `ClientError::Invalid`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        let expected = self.contractor_type.inn_length();
        match self.inn.as_deref().map(str::trim) {
            Some(inn) if !inn.is_empty() && inn.len() != expected => Err(ClientError::Invalid(
                format!("ИНН должен содержать {expected} цифр для этой формы"),
            )),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Contracts
// ============================================================================

/// Contract create/update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContractForm {
    /// Contract number.
    #[garde(custom(not_blank))]
    pub number: String,
    /// Project.
    #[garde(skip)]
    pub project_id: ProjectId,
    /// Contractor.
    #[garde(custom(required))]
    pub contractor_id: Option<ContractorId>,
    /// Payment terms.
    #[garde(skip)]
    pub payment_type: PaymentType,
    /// Payment period for periodic contracts.
    #[garde(skip)]
    pub payment_period: Option<String>,
    /// Contract currency.
    #[garde(skip)]
    pub currency: Currency,
    /// Lifecycle state.
    #[garde(skip)]
    pub status: ContractStatus,
    /// Signing date.
    #[garde(skip)]
    pub signed_at: Option<NaiveDate>,
    /// First day covered.
    #[garde(skip)]
    pub valid_from: Option<NaiveDate>,
    /// Last day covered.
    #[garde(skip)]
    pub valid_to: Option<NaiveDate>,
    /// Tax scheme agreed in the contract.
    #[garde(skip)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Whether the contract scheme overrides the contractor's.
    #[garde(skip)]
    pub tax_override: bool,
    /// Notes.
    #[garde(skip)]
    pub notes: Option<String>,
    /// Budget lines paid under this contract.
    #[garde(skip)]
    pub budget_line_ids: Vec<LineId>,
}

impl ContractForm {
    /// Draft contract for `project_id`.
    #[must_use]
    pub fn new(project_id: ProjectId, number: impl Into<String>, payment_type: PaymentType) -> Self {
        Self {
            number: number.into(),
            project_id,
            contractor_id: None,
            payment_type,
            payment_period: None,
            currency: Currency::default(),
            status: ContractStatus::default(),
            signed_at: None,
            valid_from: None,
            valid_to: None,
            tax_scheme_id: None,
            tax_override: false,
            notes: None,
            budget_line_ids: Vec::new(),
        }
    }

    /// Validates fields and the validity period.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` or `ClientError::Invalid`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        dates_in_order(self.valid_from, self.valid_to, "Договор")
    }
}

// ============================================================================
// Tax schemes
// ============================================================================

/// One component of a new tax scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ComponentForm {
    /// Component name.
    #[garde(custom(not_blank))]
    pub name: String,
    /// Rate as a fraction.
    #[garde(custom(fraction))]
    pub rate: Decimal,
    /// INTERNAL or EXTERNAL.
    #[garde(skip)]
    #[serde(rename = "type")]
    pub kind: TaxKind,
    /// Who receives the tax.
    #[garde(skip)]
    pub recipient: Recipient,
    /// Position within the scheme.
    #[garde(skip)]
    pub sort_order: i32,
}

/// Tax scheme create form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TaxSchemeForm {
    /// Scheme name.
    #[garde(custom(not_blank))]
    pub name: String,
    /// Components in evaluation order.
    #[garde(length(min = 1), dive)]
    pub components: Vec<ComponentForm>,
}

impl TaxSchemeForm {
    /// Appends a component after the existing ones.
    #[must_use]
    pub fn with_component(mut self, name: &str, rate: Decimal, kind: TaxKind, recipient: Recipient) -> Self {
        let sort_order = i32::try_from(self.components.len()).unwrap_or(i32::MAX);
        self.components.push(ComponentForm {
            name: name.to_string(),
            rate,
            kind,
            recipient,
            sort_order,
        });
        self
    }

    /// Components as the tax engine sees them.
    ///
    /// # Errors
    ///
    /// Returns `TaxError` for a rate the component kind does not allow.
    pub fn components(&self) -> Result<Vec<TaxComponent>, TaxError> {
        self.components
            .iter()
            .map(|c| {
                TaxComponent::new(c.name.trim(), c.rate, c.kind, c.recipient)
                    .map(|component| component.with_sort_order(c.sort_order))
            })
            .collect()
    }

    /// Validates fields and every component rate against its kind.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` or `ClientError::Tax`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        self.components()?;
        Ok(())
    }
}

// ============================================================================
// Production
// ============================================================================

/// Production report create/update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReportForm {
    /// Shooting day number, from 1.
    #[garde(range(min = 1))]
    pub shoot_day_number: u32,
    /// Calendar date.
    #[garde(skip)]
    pub date: NaiveDate,
    /// Location.
    #[garde(skip)]
    pub location: Option<String>,
    /// Shooting group.
    #[garde(skip)]
    pub shooting_group: Option<String>,
    /// Notes.
    #[garde(skip)]
    pub notes: Option<String>,
    /// Workflow state.
    #[garde(skip)]
    pub status: ReportStatus,
}

impl ReportForm {
    /// Draft report for a shooting day.
    #[must_use]
    pub fn new(shoot_day_number: u32, date: NaiveDate) -> Self {
        Self {
            shoot_day_number,
            date,
            location: None,
            shooting_group: None,
            notes: None,
            status: ReportStatus::default(),
        }
    }

    /// Validates fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// Report entry create/update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EntryForm {
    /// Contractor.
    #[garde(custom(required))]
    pub contractor_id: Option<ContractorId>,
    /// Budget line charged.
    #[garde(skip)]
    pub budget_line_id: Option<LineId>,
    /// Contract.
    #[garde(skip)]
    pub contract_id: Option<ContractId>,
    /// Origin.
    #[garde(skip)]
    pub source: EntrySource,
    /// Shift start.
    #[garde(skip)]
    pub shift_start: Option<NaiveTime>,
    /// Shift end.
    #[garde(skip)]
    pub shift_end: Option<NaiveTime>,
    /// Lunch break.
    #[garde(range(max = 1440))]
    pub lunch_break_minutes: u32,
    /// Unpaid gap.
    #[garde(range(max = 1440))]
    pub gap_minutes: u32,
    /// Equipment used.
    #[garde(skip)]
    pub equipment: Option<String>,
    /// Pricing unit.
    #[garde(custom(not_blank))]
    pub unit: String,
    /// Quantity.
    #[garde(custom(non_negative))]
    pub quantity: Decimal,
    /// Net rate.
    #[garde(custom(non_negative))]
    pub rate: Decimal,
    /// Tax scheme.
    #[garde(skip)]
    pub tax_scheme_id: Option<TaxSchemeId>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self {
            contractor_id: None,
            budget_line_id: None,
            contract_id: None,
            source: EntrySource::Manual,
            shift_start: None,
            shift_end: None,
            lunch_break_minutes: 60,
            gap_minutes: 0,
            equipment: None,
            unit: UnitType::Shift.as_str().to_lowercase(),
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            tax_scheme_id: None,
        }
    }
}

impl EntryForm {
    /// Validates fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation`.
    pub fn check(&self) -> ClientResult<()> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod tests;
