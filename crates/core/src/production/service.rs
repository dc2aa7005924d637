//! Production report math.

use chrono::{NaiveTime, Timelike};
use filmbudget_shared::types::TaxSchemeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{ProductionReport, ReportEntry};
use crate::catalog::{Contract, Contractor};
use crate::tax::{TaxEngine, TaxError, TaxSpec};

/// Length of a regular shift; anything worked beyond it is overtime.
pub const BASE_SHIFT_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Net and gross amount of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAmounts {
    /// `rate * quantity`.
    pub net: Decimal,
    /// Net plus tax.
    pub gross: Decimal,
}

/// Aggregates of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of entry net amounts.
    pub total_net: Decimal,
    /// Sum of entry gross amounts.
    pub total_gross: Decimal,
    /// Number of entries.
    pub entry_count: usize,
}

/// Production report service.
pub struct ProductionService;

impl ProductionService {
    /// Overtime above the base shift, rounded to 2 decimals.
    ///
    /// A shift ending before it starts crosses midnight. Lunch and gap
    /// minutes are not worked time. Zero when either time is missing.
    #[must_use]
    pub fn overtime_hours(
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        lunch_break_minutes: u32,
        gap_minutes: u32,
    ) -> Decimal {
        let (Some(start), Some(end)) = (start, end) else {
            return Decimal::ZERO;
        };

        let mut total = minute_of_day(end) - minute_of_day(start);
        if total < 0 {
            total += MINUTES_PER_DAY;
        }
        let worked = total - i64::from(lunch_break_minutes) - i64::from(gap_minutes);
        if worked <= 0 {
            return Decimal::ZERO;
        }

        let hours = Decimal::from(worked) / Decimal::from(60);
        (hours - BASE_SHIFT_HOURS)
            .max(Decimal::ZERO)
            .round_dp(2)
    }

    /// Net and gross of an entry under `spec`, rounded to 2 decimals.
    ///
    /// # Errors
    ///
    /// Returns `TaxError::PercentOutOfRange` if a fixed-type percentage is invalid.
    pub fn entry_amounts(rate: Decimal, quantity: Decimal, spec: &TaxSpec) -> Result<EntryAmounts, TaxError> {
        let line = TaxEngine::line(rate, quantity, spec)?;
        Ok(EntryAmounts {
            net: (rate * quantity).round_dp(2),
            gross: line.gross.round_dp(2),
        })
    }

    /// Sums the amounts of `entries`.
    #[must_use]
    pub fn totals(entries: &[ReportEntry]) -> ReportTotals {
        entries.iter().fold(ReportTotals::default(), |mut acc, e| {
            acc.total_net += e.amount_net;
            acc.total_gross += e.amount_gross;
            acc.entry_count += 1;
            acc
        })
    }

    /// Recomputes a report's aggregates from its entries.
    pub fn refresh_totals(report: &mut ProductionReport) {
        let totals = Self::totals(&report.entries);
        report.total_net = totals.total_net;
        report.total_gross = totals.total_gross;
        report.entry_count = totals.entry_count;
    }

    /// Default tax scheme for a new entry: the contract's, else the contractor's.
    #[must_use]
    pub fn default_tax_scheme(
        contract: Option<&Contract>,
        contractor: Option<&Contractor>,
    ) -> Option<TaxSchemeId> {
        contract
            .and_then(|c| c.tax_scheme_id)
            .or_else(|| contractor.and_then(|c| c.tax_scheme_id))
    }
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
