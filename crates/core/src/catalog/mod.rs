//! Projects, contractors and contracts.

pub mod contract;
pub mod contractor;
pub mod project;

pub use contract::{Contract, ContractStatus, PaymentType};
pub use contractor::{Contractor, ContractorType};
pub use project::{Project, ProjectParam, ProjectStatus};
