//! Budget data types.

use chrono::NaiveDate;
use filmbudget_shared::types::{CategoryId, ContractorId, LineId, SubcategoryId, TaxSchemeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::tax::{FixedTaxType, TaxScheme, TaxSpec};

/// Unit a budget line is priced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Shooting shift.
    #[default]
    #[serde(rename = "Смена")]
    Shift,
    /// Calendar month.
    #[serde(rename = "Месяц")]
    Month,
    /// Calendar week.
    #[serde(rename = "Неделя")]
    Week,
    /// Calendar day.
    #[serde(rename = "День")]
    Day,
    /// Hour.
    #[serde(rename = "Час")]
    Hour,
    /// Piece.
    #[serde(rename = "Шт")]
    Piece,
    /// Kilometre.
    #[serde(rename = "Км")]
    Km,
    /// Lump sum.
    #[serde(rename = "Аккорд")]
    Accord,
    /// Episode.
    #[serde(rename = "Серия")]
    Series,
    /// Commercial spot.
    #[serde(rename = "Ролик")]
    Reel,
    /// Hotel room per night.
    #[serde(rename = "Номер/ночь")]
    RoomNight,
}

impl UnitType {
    /// All units in display order.
    pub const ALL: [Self; 11] = [
        Self::Shift,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Piece,
        Self::Km,
        Self::Accord,
        Self::Series,
        Self::Reel,
        Self::RoomNight,
    ];

    /// Label used by the backend and in the grid.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shift => "Смена",
            Self::Month => "Месяц",
            Self::Week => "Неделя",
            Self::Day => "День",
            Self::Hour => "Час",
            Self::Piece => "Шт",
            Self::Km => "Км",
            Self::Accord => "Аккорд",
            Self::Series => "Серия",
            Self::Reel => "Ролик",
            Self::RoomNight => "Номер/ночь",
        }
    }

    /// Overtime is only paid on shift and day rates.
    #[must_use]
    pub const fn allows_overtime(self) -> bool {
        matches!(self, Self::Shift | Self::Day)
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().to_lowercase() == wanted)
            .ok_or_else(|| BudgetError::UnknownUnit(s.to_string()))
    }
}

/// A leaf of the budget tree.
///
/// Computed figures are never stored here; see
/// [`BudgetService::line_totals`](super::BudgetService::line_totals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Line ID.
    pub id: LineId,
    /// Owning subcategory, absent for lines built from parent-pointer records.
    #[serde(default)]
    pub subcategory_id: Option<SubcategoryId>,
    /// Line name.
    pub name: String,
    /// Linked contractor.
    #[serde(default)]
    pub contractor_id: Option<ContractorId>,
    /// Contractor name as typed or resolved by the backend.
    #[serde(default, alias = "contractor")]
    pub contractor_name: Option<String>,
    /// Pricing unit.
    #[serde(default, alias = "unit_type")]
    pub unit: UnitType,
    /// Net rate per unit.
    #[serde(default)]
    pub rate: Decimal,
    /// Planned quantity.
    #[serde(default)]
    pub qty_plan: Decimal,
    /// Actual quantity.
    #[serde(default)]
    pub qty_fact: Decimal,
    /// First working date.
    #[serde(default)]
    pub date_start: Option<NaiveDate>,
    /// Last working date.
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
    /// Tax scheme; takes precedence over `tax_type`.
    #[serde(default)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Legacy fixed tax type.
    #[serde(default)]
    pub tax_type: Option<FixedTaxType>,
    /// First fixed-type rate, in percent.
    #[serde(default)]
    pub tax_rate_1: Decimal,
    /// Second fixed-type rate, in percent.
    #[serde(default)]
    pub tax_rate_2: Decimal,
    /// Net overtime rate per hour.
    #[serde(default)]
    pub ot_rate: Decimal,
    /// Planned overtime hours per shift.
    #[serde(default)]
    pub ot_hours_plan: Decimal,
    /// Planned shifts with overtime.
    #[serde(default)]
    pub ot_shifts_plan: Decimal,
    /// Actual overtime hours per shift.
    #[serde(default)]
    pub ot_hours_fact: Decimal,
    /// Actual shifts with overtime.
    #[serde(default)]
    pub ot_shifts_fact: Decimal,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
    /// Position within the subcategory.
    #[serde(default)]
    pub order_index: i32,
    /// Amount already paid.
    #[serde(default)]
    pub paid: Decimal,
    /// Approved limit, set by "save limit".
    #[serde(default)]
    pub limit_amount: Option<Decimal>,
}

impl BudgetLine {
    /// Creates an empty line with the given name.
    #[must_use]
    pub fn new(id: LineId, name: impl Into<String>) -> Self {
        Self {
            id,
            subcategory_id: None,
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
            tax_type: None,
            tax_rate_1: Decimal::ZERO,
            tax_rate_2: Decimal::ZERO,
            ot_rate: Decimal::ZERO,
            ot_hours_plan: Decimal::ZERO,
            ot_shifts_plan: Decimal::ZERO,
            ot_hours_fact: Decimal::ZERO,
            ot_shifts_fact: Decimal::ZERO,
            note: None,
            order_index: 0,
            paid: Decimal::ZERO,
            limit_amount: None,
        }
    }

    /// Resolves the tax specification for this line.
    ///
    /// A scheme ID wins over a fixed type. A scheme ID that is not among
    /// `schemes` falls back to the fixed type, then to no tax.
    #[must_use]
    pub fn tax_spec(&self, schemes: &[TaxScheme]) -> TaxSpec {
        if let Some(scheme) = self.scheme(schemes) {
            return scheme.spec();
        }
        match self.tax_type {
            Some(tax_type) => TaxSpec::FixedType {
                tax_type,
                rate_1: self.tax_rate_1,
                rate_2: self.tax_rate_2,
            },
            None => TaxSpec::None,
        }
    }

    /// Short tax label for display: scheme name, fixed type, or empty.
    #[must_use]
    pub fn tax_label(&self, schemes: &[TaxScheme]) -> String {
        self.scheme(schemes).map_or_else(
            || self.tax_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            |scheme| scheme.name.clone(),
        )
    }

    fn scheme<'a>(&self, schemes: &'a [TaxScheme]) -> Option<&'a TaxScheme> {
        let id = self.tax_scheme_id?;
        schemes.iter().find(|s| s.id == id)
    }
}

/// A budget subcategory and its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Subcategory ID.
    pub id: SubcategoryId,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Subcategory name.
    pub name: String,
    /// Position within the category.
    #[serde(default)]
    pub order_index: i32,
    /// Lines.
    #[serde(default)]
    pub lines: Vec<BudgetLine>,
}

/// A top-level budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Position within the budget.
    #[serde(default)]
    pub order_index: i32,
    /// Subcategories.
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Project budget as returned by `GET /projects/{id}/budget`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTree {
    /// Categories.
    pub categories: Vec<Category>,
}

impl BudgetTree {
    /// Every line in tree order.
    pub fn lines(&self) -> impl Iterator<Item = &BudgetLine> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.lines.iter())
    }

    /// Finds a line by ID.
    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&BudgetLine> {
        self.lines().find(|l| l.id == id)
    }
}
