//! Typed endpoints of the budget backend.
//!
//! Each submodule adds the calls of one resource to [`ApiClient`](crate::ApiClient).
//! Lists of tax schemes and contractors go through the reference cache and
//! every write to them invalidates it.

pub mod auth;
pub mod budget;
pub mod contractors;
pub mod contracts;
pub mod production;
pub mod projects;
pub mod tax_schemes;

pub use contracts::ContractFilter;
