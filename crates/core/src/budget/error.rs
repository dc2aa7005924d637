//! Budget error types.

use filmbudget_shared::types::LineId;
use thiserror::Error;
use uuid::Uuid;

use crate::tax::TaxError;

/// Budget-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// A line carries a tax configuration that cannot be evaluated.
    #[error("Invalid tax configuration on line {line}: {source}")]
    InvalidTax {
        /// Offending line.
        line: LineId,
        /// Underlying tax error.
        source: TaxError,
    },

    /// Two records share one ID.
    #[error("Duplicate budget node: {0}")]
    DuplicateNode(Uuid),

    /// A record points at a parent that does not exist.
    #[error("Budget node {node} refers to unknown parent {parent}")]
    UnknownParent {
        /// Child record.
        node: Uuid,
        /// Missing parent.
        parent: Uuid,
    },

    /// Only groups may have children.
    #[error("Budget item {0} cannot have children")]
    ItemWithChildren(Uuid),

    /// An ITEM record arrived without its line data.
    #[error("Budget item {0} has no line data")]
    MissingLineData(Uuid),

    /// Records form a cycle and never reach a root.
    #[error("Budget node {0} is part of a parent cycle")]
    Cycle(Uuid),

    /// Unit label not recognised.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}
