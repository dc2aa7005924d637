//! Backend client and page controllers for Filmbudget.
//!
//! This crate talks to the budget backend and keeps the state of open views:
//! - `session`: token persistence and the session lifecycle
//! - `http`: authenticated requests with a single refresh-and-retry on `401`
//! - `api`: typed endpoints per resource
//! - `cache`: TTL cache of tax schemes and contractors
//! - `scope`: view-scoped request cancellation
//! - `forms`: request payloads with local validation
//! - `pages`: one controller per screen

pub mod api;
pub mod cache;
pub mod error;
pub mod forms;
pub mod http;
pub mod pages;
pub mod scope;
pub mod session;

pub use cache::ReferenceCache;
pub use error::{ClientError, ClientResult, Notice, SessionError};
pub use http::ApiClient;
pub use scope::ViewScope;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionState, TokenStore};
