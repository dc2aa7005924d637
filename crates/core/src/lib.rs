//! Core budget logic for filmbudget.
//!
//! This crate contains pure calculations with ZERO network dependencies.
//! Everything the client shows in a budget grid is derived here from the
//! data the backend returns.
//!
//! # Modules
//!
//! - `tax` - Tax schemes and per-unit tax evaluation
//! - `budget` - Budget tree, line totals, flattening and limit deltas
//! - `grid` - Grid column catalogue and cell edit translation
//! - `production` - Daily production reports, overtime and entry amounts
//! - `catalog` - Projects, contractors and contracts

pub mod budget;
pub mod catalog;
pub mod grid;
pub mod production;
pub mod tax;
