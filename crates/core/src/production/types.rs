//! Production report data types.

use chrono::{NaiveDate, NaiveTime};
use filmbudget_shared::types::{ContractId, ContractorId, EntryId, LineId, ProjectId, ReportId, TaxSchemeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Report workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    /// Being filled in.
    #[default]
    Draft,
    /// Sent for approval.
    Submitted,
    /// Approved by the producer.
    Approved,
}

/// Where an entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntrySource {
    /// Reported through the Telegram bot.
    TgBot,
    /// Typed in by hand.
    #[default]
    Manual,
    /// Parsed by the assistant.
    Assistant,
}

/// Payment state of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Awaiting approval.
    #[default]
    Pending,
    /// Approved for payment.
    Approved,
    /// Payment in progress.
    InPayment,
    /// Paid out.
    Paid,
}

/// One contractor's work on a shooting day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Owning report.
    pub report_id: ReportId,
    /// Contractor.
    pub contractor_id: ContractorId,
    /// Contractor name, resolved by the backend.
    #[serde(default)]
    pub contractor_name: Option<String>,
    /// Budget line the work is charged to.
    #[serde(default)]
    pub budget_line_id: Option<LineId>,
    /// Contract the work falls under.
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    /// Origin of the entry.
    #[serde(default)]
    pub source: EntrySource,
    /// Shift start.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Shift end; earlier than the start when the shift crosses midnight.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
    /// Lunch break.
    #[serde(default = "default_lunch")]
    pub lunch_break_minutes: u32,
    /// Unpaid gap.
    #[serde(default)]
    pub gap_minutes: u32,
    /// Overtime above the base shift.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Equipment used.
    #[serde(default)]
    pub equipment: Option<String>,
    /// Unit label.
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Quantity of units.
    #[serde(default)]
    pub quantity: Decimal,
    /// Net rate per unit.
    #[serde(default)]
    pub rate: Decimal,
    /// Tax scheme.
    #[serde(default)]
    pub tax_scheme_id: Option<TaxSchemeId>,
    /// Net amount.
    #[serde(default)]
    pub amount_net: Decimal,
    /// Gross amount.
    #[serde(default)]
    pub amount_gross: Decimal,
    /// Payment state.
    #[serde(default)]
    pub status: EntryStatus,
}

/// Lunch break assumed when none is given.
pub(crate) const DEFAULT_LUNCH_MINUTES: u32 = 60;

fn default_lunch() -> u32 {
    DEFAULT_LUNCH_MINUTES
}

fn default_unit() -> String {
    "смена".to_string()
}

/// Daily production report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionReport {
    /// Report ID.
    pub id: ReportId,
    /// Project.
    pub project_id: ProjectId,
    /// Shooting day number.
    pub shoot_day_number: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Shooting unit.
    #[serde(default)]
    pub shooting_group: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Workflow state.
    #[serde(default)]
    pub status: ReportStatus,
    /// Entries.
    #[serde(default)]
    pub entries: Vec<ReportEntry>,
    /// Sum of entry net amounts.
    #[serde(default)]
    pub total_net: Decimal,
    /// Sum of entry gross amounts.
    #[serde(default)]
    pub total_gross: Decimal,
    /// Number of entries.
    #[serde(default)]
    pub entry_count: usize,
}
