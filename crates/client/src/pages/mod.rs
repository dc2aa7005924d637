//! Page controllers.
//!
//! A controller holds the state of one open view and owns a
//! [`ViewScope`](crate::ViewScope): dropping the controller cancels whatever
//! it still has in flight. Actions leave local state untouched when they
//! fail; state is replaced only by a successful reload.

pub mod budget;
pub mod contractors;
pub mod contracts;
pub mod production;
pub mod projects;
pub mod tax_schemes;

pub use budget::BudgetPage;
pub use contractors::ContractorsPage;
pub use contracts::{ContractsPage, LineChoice};
pub use production::{EntryPreview, ProductionPage};
pub use projects::ProjectsPage;
pub use tax_schemes::TaxSchemesPage;
