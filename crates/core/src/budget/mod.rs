//! Budget tree, line totals, flattening and limit deltas.

pub mod error;
pub mod flatten;
pub mod service;
pub mod tree;
pub mod types;
pub mod variance;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use flatten::{CollapseState, FlatRow, RowTotals, flatten};
pub use service::{BudgetService, LineTotals};
pub use tree::{BudgetNode, GroupKind, GroupNode, NodeKind, NodeRecord, RecordType};
pub use types::{BudgetLine, BudgetTree, Category, Subcategory, UnitType};
pub use variance::{LimitEntry, LimitSnapshot, format_limit_pct, limit_delta};
