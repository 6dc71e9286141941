//! # Supabase Route Guard
//!
//! A small web server whose pages sit behind a hosted auth provider
//! (Supabase). The provider owns sign-in, tokens and sessions; this crate
//! only reads whether the current request has a session and decides
//! whether it may reach the page it asked for.
//!
//! ## Modules
//! - `config`: environment-driven configuration
//! - `session`: session types and the provider client
//! - `guard`: the route guard and the provider redirect layer
//! - `middleware`: wires the guards into axum
//! - `handlers`: pages and endpoints
//! - `routes`: route table and router
//! - `templates`: handlebars page templates

pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
