//! # Middleware Module
//!
//! Request interceptors, listed outermost first:
//! - `session`: looks up the current session once and stores it in the
//!   request extensions
//! - `provider`: the auth provider's redirect protection
//! - `auth`: the per-route guard
//!
//! The two guard layers are independent. Either one may redirect to the
//! login page.

pub mod auth;
pub mod provider;
pub mod session;
