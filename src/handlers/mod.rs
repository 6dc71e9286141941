//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `pages`: server-rendered pages (home, login, register, callback,
//!   dashboard, account)
//! - `session`: session info endpoint
//! - `health`: health check endpoint
//! - `devtools`: developer endpoints, mounted only when enabled

pub mod devtools;
pub mod health;
pub mod pages;
pub mod session;
