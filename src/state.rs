//! # Application State
//!
//! Shared state handed to every middleware and handler. Everything in here
//! is built once at startup and only read afterwards, so cloning the state
//! per request just bumps a few `Arc` counters.

use crate::config::Config;
use crate::error::AppResult;
use crate::guard::{ProviderRedirect, RouteGuard, RouteTable};
use crate::routes;
use crate::session::{SessionProvider, SupabaseClient};
use crate::templates::Pages;
use std::sync::Arc;

/// Shared application state
///
/// ## Thread Safety
/// All fields are `Arc`s of immutable values (the session provider is
/// `Send + Sync`), so the state can be shared across Tokio tasks freely.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<Config>,

    /// Where the current session comes from
    ///
    /// A trait object so tests can swap the real auth provider for a
    /// canned one.
    pub sessions: Arc<dyn SessionProvider>,

    /// Route definitions with their auth requirement
    pub routes: Arc<RouteTable>,

    /// Per-route guard
    pub route_guard: Arc<RouteGuard>,

    /// The auth provider's own redirect protection
    pub provider_redirect: Arc<ProviderRedirect>,

    /// Page templates
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Initialize application state against the real auth provider
    ///
    /// # Errors
    /// Returns an error if:
    /// - `SUPABASE_URL` or `SUPABASE_KEY` is missing
    /// - a route or exclusion pattern does not compile
    /// - a page template does not compile
    pub fn new(config: Config) -> AppResult<Self> {
        let client = SupabaseClient::new(&config.supabase)?;
        Self::with_session_provider(config, Arc::new(client))
    }

    /// Initialize application state with any session provider
    pub fn with_session_provider(
        config: Config,
        sessions: Arc<dyn SessionProvider>,
    ) -> AppResult<Self> {
        let redirect = &config.supabase.redirect_options;
        let route_table = routes::route_table(redirect, config.login_requirement())?;
        let route_guard = RouteGuard::new(redirect.login.clone(), config.login_loop);
        let provider_redirect = ProviderRedirect::from_config(&config.supabase)?;
        let pages = Pages::new()?;

        Ok(AppState {
            config: Arc::new(config),
            sessions,
            routes: Arc::new(route_table),
            route_guard: Arc::new(route_guard),
            provider_redirect: Arc::new(provider_redirect),
            pages: Arc::new(pages),
        })
    }
}
