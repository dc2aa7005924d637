//! Grid error types.

use thiserror::Error;
use uuid::Uuid;

use super::columns::ColumnKey;

/// Reasons a cell edit is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Group rows show aggregates only.
    #[error("Row {0} is a group and cannot be edited")]
    ReadOnlyRow(Uuid),

    /// Computed columns cannot be edited.
    #[error("Column \"{0}\" is computed and cannot be edited")]
    ReadOnlyColumn(ColumnKey),

    /// No row with this ID is loaded.
    #[error("Row not found: {0}")]
    RowNotFound(Uuid),

    /// Text is not a number.
    #[error("\"{value}\" is not a number")]
    InvalidNumber {
        /// Raw text.
        value: String,
    },

    /// Amounts and quantities cannot be negative.
    #[error("Column \"{column}\" cannot be negative")]
    Negative {
        /// Target column.
        column: ColumnKey,
    },

    /// Text is not a date.
    #[error("\"{0}\" is not a date; use DD.MM.YYYY")]
    InvalidDate(String),

    /// Unit label not recognised.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Neither a loaded tax scheme nor a fixed tax type has this name.
    #[error("Unknown tax scheme: {0}")]
    UnknownTaxScheme(String),

    /// Line names cannot be blank.
    #[error("Name cannot be empty")]
    EmptyName,
}
