//! vetech-core - Core library for VeTech
//!
//! This crate contains the session store, the token-claims decoder, the
//! authenticated HTTP pipeline, and the resource wrappers used by every
//! VeTech interface.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod util;

pub use auth::{MemorySessionStore, Session, SessionManager, SessionPersistence, SessionUser};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{ApiClient, ApiError, ApiResult};
