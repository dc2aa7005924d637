//! Daily production reports.
//!
//! A report covers one shooting day; each entry records one contractor's
//! shift with its overtime and the amounts owed for it.

pub mod service;
pub mod types;


pub use service::{BASE_SHIFT_HOURS, EntryAmounts, ProductionService, ReportTotals};
pub use types::{EntrySource, EntryStatus, ProductionReport, ReportEntry, ReportStatus};
