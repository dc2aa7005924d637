//! Grid column catalogue and cell edit translation.

pub mod columns;
pub mod edit;
pub mod error;


pub use columns::{Column, ColumnKey, ValueKind, columns};
pub use edit::{CellEdit, EditContext, LineUpdate, parse_date, parse_number};
pub use error::GridError;
