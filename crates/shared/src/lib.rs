//! Shared types, errors, and configuration for Filmbudget.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes and money formatting
//! - Authentication token payloads
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{LoginRequest, RefreshRequest, TokenPair, UserInfo};
pub use config::{ApiConfig, AppConfig, CacheConfig, GridConfig, SessionConfig};
pub use error::{AppError, AppResult, FailureKind};
