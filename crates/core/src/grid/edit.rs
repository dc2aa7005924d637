//! Cell edit translation.
//!
//! Every accepted edit becomes a [`LineUpdate`] carrying only the fields of
//! the edited cell, which the client sends as a partial update of the line.
//! Most cells map to one field. The contractor cell always writes both the
//! id and the name, and the tax cell writes the scheme and the fixed type.

use std::str::FromStr;

use chrono::NaiveDate;
use filmbudget_shared::types::{ContractorId, LineId, TaxSchemeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::columns::ColumnKey;
use super::error::GridError;
use crate::budget::{FlatRow, UnitType};
use crate::catalog::Contractor;
use crate::tax::{FixedTaxType, TaxScheme};

/// A raw edit made in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    /// Edited row.
    pub row_id: Uuid,
    /// Edited column.
    pub column: ColumnKey,
    /// Text as typed.
    pub value: String,
}

impl CellEdit {
    /// Creates an edit.
    #[must_use]
    pub fn new(row_id: Uuid, column: ColumnKey, value: impl Into<String>) -> Self {
        Self {
            row_id,
            column,
            value: value.into(),
        }
    }
}

/// Partial update of a budget line.
///
/// Absent fields are left untouched. For nullable fields `Some(None)` is sent
/// as `null` and clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUpdate {
    /// Line name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Linked contractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<Option<ContractorId>>,
    /// Free-text contractor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_name: Option<Option<String>>,
    /// Pricing unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitType>,
    /// Net rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Planned quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_plan: Option<Decimal>,
    /// Actual quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty_fact: Option<Decimal>,
    /// First working date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<Option<NaiveDate>>,
    /// Last working date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<Option<NaiveDate>>,
    /// Tax scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_scheme_id: Option<Option<TaxSchemeId>>,
    /// Legacy fixed tax type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<Option<FixedTaxType>>,
    /// First fixed-type rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_1: Option<Decimal>,
    /// Second fixed-type rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate_2: Option<Decimal>,
    /// Overtime rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_rate: Option<Decimal>,
    /// Planned overtime hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_hours_plan: Option<Decimal>,
    /// Planned overtime shifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_shifts_plan: Option<Decimal>,
    /// Actual overtime hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_hours_fact: Option<Decimal>,
    /// Actual overtime shifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_shifts_fact: Option<Decimal>,
    /// Note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Option<String>>,
    /// Position within the subcategory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    /// Approved limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<Option<Decimal>>,
}

/// Reference data edits are resolved against.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    /// Loaded tax schemes.
    pub schemes: &'a [TaxScheme],
    /// Loaded contractors.
    pub contractors: &'a [Contractor],
}

impl EditContext<'_> {
    /// Translates a cell edit on `row` into a partial line update.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ReadOnlyRow` for group rows and
    /// `GridError::ReadOnlyColumn` for computed columns. Other variants
    /// describe text that cannot be parsed or resolved.
    pub fn translate(&self, edit: &CellEdit, row: &FlatRow) -> Result<(LineId, LineUpdate), GridError> {
        let Some(line) = row.line.as_ref() else {
            return Err(GridError::ReadOnlyRow(row.id));
        };
        if !edit.column.is_editable() {
            return Err(GridError::ReadOnlyColumn(edit.column));
        }

        let text = edit.value.trim();
        let mut update = LineUpdate::default();
        match edit.column {
            ColumnKey::Name => {
                if text.is_empty() {
                    return Err(GridError::EmptyName);
                }
                update.name = Some(text.to_string());
            }
            ColumnKey::Contractor => self.resolve_contractor(text, &mut update),
            ColumnKey::Unit => {
                let unit = UnitType::from_str(text).map_err(|_| GridError::UnknownUnit(text.to_string()))?;
                update.unit = Some(unit);
            }
            ColumnKey::DateStart => update.date_start = Some(parse_optional_date(text)?),
            ColumnKey::DateEnd => update.date_end = Some(parse_optional_date(text)?),
            ColumnKey::Rate => update.rate = Some(non_negative(edit.column, text)?),
            ColumnKey::QtyPlan => update.qty_plan = Some(non_negative(edit.column, text)?),
            ColumnKey::QtyFact => update.qty_fact = Some(non_negative(edit.column, text)?),
            ColumnKey::TaxScheme => self.resolve_tax(text, &mut update)?,
            ColumnKey::Note => update.note = Some((!text.is_empty()).then(|| text.to_string())),
            ColumnKey::Limit => {
                update.limit_amount = if text.is_empty() {
                    Some(None)
                } else {
                    Some(Some(non_negative(edit.column, text)?))
                };
            }
            ColumnKey::Net
            | ColumnKey::Tax
            | ColumnKey::Total
            | ColumnKey::FactTotal
            | ColumnKey::PlanPct
            | ColumnKey::FactPct
            | ColumnKey::Paid => return Err(GridError::ReadOnlyColumn(edit.column)),
        }

        Ok((line.id, update))
    }

    /// Known contractors set id and name; free text clears the id.
    fn resolve_contractor(&self, text: &str, update: &mut LineUpdate) {
        let (id, name) = if text.is_empty() {
            (None, None)
        } else {
            match self
                .contractors
                .iter()
                .find(|c| c.full_name.trim().to_lowercase() == text.to_lowercase())
            {
                Some(contractor) => (Some(contractor.id), Some(contractor.full_name.clone())),
                None => (None, Some(text.to_string())),
            }
        };
        update.contractor_id = Some(id);
        update.contractor_name = Some(name);
    }

    /// Scheme names win over fixed-type labels; blank clears both.
    fn resolve_tax(&self, text: &str, update: &mut LineUpdate) -> Result<(), GridError> {
        if text.is_empty() {
            update.tax_scheme_id = Some(None);
            update.tax_type = Some(None);
            return Ok(());
        }
        if let Some(scheme) = self
            .schemes
            .iter()
            .find(|s| s.name.trim().to_lowercase() == text.to_lowercase())
        {
            update.tax_scheme_id = Some(Some(scheme.id));
            return Ok(());
        }
        let tax_type =
            FixedTaxType::from_str(text).map_err(|_| GridError::UnknownTaxScheme(text.to_string()))?;
        update.tax_scheme_id = Some(None);
        update.tax_type = Some(Some(tax_type));
        Ok(())
    }
}

/// Parses a number typed in the grid.
///
/// Spaces (including non-breaking ones) are ignored and a comma is accepted
/// as the decimal separator. Empty text is zero.
///
/// # Errors
///
/// Returns `GridError::InvalidNumber` if the text is not a number.
pub fn parse_number(text: &str) -> Result<Decimal, GridError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|_| GridError::InvalidNumber {
        value: text.to_string(),
    })
}

/// Parses a date typed as `DD.MM.YYYY` or `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `GridError::InvalidDate` if neither format matches.
pub fn parse_date(text: &str) -> Result<NaiveDate, GridError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| GridError::InvalidDate(text.to_string()))
}

fn parse_optional_date(text: &str) -> Result<Option<NaiveDate>, GridError> {
    if text.is_empty() {
        Ok(None)
    } else {
        parse_date(text).map(Some)
    }
}

fn non_negative(column: ColumnKey, text: &str) -> Result<Decimal, GridError> {
    let value = parse_number(text)?;
    if value < Decimal::ZERO {
        return Err(GridError::Negative { column });
    }
    Ok(value)
}
