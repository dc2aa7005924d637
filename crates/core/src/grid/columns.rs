//! Grid column catalogue.

use serde::{Deserialize, Serialize};

use filmbudget_shared::types::format_amount;

use crate::budget::FlatRow;

/// Value kind of a column, used for editors and alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text.
    Text,
    /// Decimal number.
    Number,
    /// Calendar date.
    Date,
    /// One of a fixed list.
    Choice,
    /// Signed percentage.
    Percent,
}

/// Column identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    /// Line name.
    Name,
    /// Contractor.
    Contractor,
    /// Pricing unit.
    Unit,
    /// First working date.
    DateStart,
    /// Last working date.
    DateEnd,
    /// Net rate.
    Rate,
    /// Planned quantity.
    QtyPlan,
    /// Actual quantity.
    QtyFact,
    /// Planned net total.
    Net,
    /// Tax scheme.
    TaxScheme,
    /// Planned tax total.
    Tax,
    /// Planned gross total including overtime.
    Total,
    /// Note.
    Note,
    /// Approved limit.
    Limit,
    /// Actual gross total.
    FactTotal,
    /// Plan against limit.
    PlanPct,
    /// Fact against limit.
    FactPct,
    /// Amount paid.
    Paid,
}

/// Static description of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column identifier.
    pub key: ColumnKey,
    /// Header text.
    pub title: &'static str,
    /// Whether line cells accept edits.
    pub editable: bool,
    /// Value kind.
    pub kind: ValueKind,
    /// Suggested width in pixels.
    pub width: u16,
}

const MAIN: [ColumnKey; 13] = [
    ColumnKey::Name,
    ColumnKey::Contractor,
    ColumnKey::Unit,
    ColumnKey::DateStart,
    ColumnKey::DateEnd,
    ColumnKey::Rate,
    ColumnKey::QtyPlan,
    ColumnKey::QtyFact,
    ColumnKey::Net,
    ColumnKey::TaxScheme,
    ColumnKey::Tax,
    ColumnKey::Total,
    ColumnKey::Note,
];

const FINANCE: [ColumnKey; 5] = [
    ColumnKey::Limit,
    ColumnKey::FactTotal,
    ColumnKey::PlanPct,
    ColumnKey::FactPct,
    ColumnKey::Paid,
];

/// Columns in display order; finance columns are appended on request.
#[must_use]
pub fn columns(show_finance: bool) -> Vec<Column> {
    let extra: &[ColumnKey] = if show_finance { &FINANCE } else { &[] };
    MAIN.iter().chain(extra).map(|k| k.column()).collect()
}

impl ColumnKey {
    /// Static description of this column.
    #[must_use]
    pub const fn column(self) -> Column {
        let (title, editable, kind, width) = match self {
            Self::Name => ("Статья", true, ValueKind::Text, 300),
            Self::Contractor => ("Контрагент", true, ValueKind::Choice, 180),
            Self::Unit => ("Ед.изм.", true, ValueKind::Choice, 90),
            Self::DateStart => ("Начало", true, ValueKind::Date, 105),
            Self::DateEnd => ("Окончание", true, ValueKind::Date, 105),
            Self::Rate => ("Ставка", true, ValueKind::Number, 100),
            Self::QtyPlan => ("Кол-во план", true, ValueKind::Number, 90),
            Self::QtyFact => ("Кол-во факт", true, ValueKind::Number, 90),
            Self::Net => ("Итого нетто", false, ValueKind::Number, 110),
            Self::TaxScheme => ("Налог", true, ValueKind::Choice, 130),
            Self::Tax => ("Сумма налога", false, ValueKind::Number, 110),
            Self::Total => ("Итого брутто", false, ValueKind::Number, 110),
            Self::Note => ("Примечание", true, ValueKind::Text, 200),
            Self::Limit => ("Лимит", true, ValueKind::Number, 110),
            Self::FactTotal => ("Факт брутто", false, ValueKind::Number, 110),
            Self::PlanPct => ("План к лимиту", false, ValueKind::Percent, 100),
            Self::FactPct => ("Факт к лимиту", false, ValueKind::Percent, 100),
            Self::Paid => ("Оплачено", false, ValueKind::Number, 110),
        };
        Column {
            key: self,
            title,
            editable,
            kind,
            width,
        }
    }

    /// Header text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        self.column().title
    }

    /// Whether line cells in this column accept edits.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        self.column().editable
    }

    /// Display text of this column for `row`.
    ///
    /// Line-only columns are blank on group rows; aggregate columns show the
    /// group totals.
    #[must_use]
    pub fn display(self, row: &FlatRow) -> String {
        let totals = &row.totals;
        match self {
            Self::Name => row.name.clone(),
            Self::Net => format_amount(totals.plan_net),
            Self::Tax => format_amount(totals.plan_tax),
            Self::Total => format_amount(totals.plan_total),
            Self::Limit => format_amount(totals.limit),
            Self::FactTotal => format_amount(totals.fact_total),
            Self::PlanPct => totals.plan_pct(),
            Self::FactPct => totals.fact_pct(),
            Self::Paid => format_amount(totals.paid),
            Self::TaxScheme => row.tax_label.clone(),
            _ => row.line.as_ref().map(|line| match self {
                Self::Contractor => line.contractor_name.clone().unwrap_or_default(),
                Self::Unit => line.unit.to_string(),
                Self::DateStart => format_date(line.date_start),
                Self::DateEnd => format_date(line.date_end),
                Self::Rate => format_amount(line.rate),
                Self::QtyPlan => format_quantity(line.qty_plan),
                Self::QtyFact => format_quantity(line.qty_fact),
                Self::Note => line.note.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_default()
}

fn format_quantity(qty: rust_decimal::Decimal) -> String {
    if qty.is_zero() {
        String::new()
    } else {
        qty.normalize().to_string()
    }
}
