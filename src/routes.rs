//! # Routes
//!
//! The route table (which pages need a session) and the axum router that
//! serves them. Both are built from the same redirect options so the login
//! and callback pages always line up with the guard configuration.

use crate::config::RedirectOptions;
use crate::error::{AppError, AppResult};
use crate::guard::{AuthRequirement, RouteTable};
use crate::handlers::{devtools, health, pages, session};
use crate::middleware::{auth, provider, session as session_mw};
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// Paths that are not configurable.
const FIXED_PATHS: [&str; 6] = ["/", "/register", "/dashboard", "/account", "/api/session", "/health"];

// Prefixes owned by built-in routes.
const FIXED_PREFIXES: [&str; 2] = ["/account/", "/__devtools"];

/// Every page and whether it needs a session. First match wins.
///
/// `login` is the requirement of the login page itself, `Public` unless
/// `ROUTE_GUARD_LOGIN_PROTECTED` is set.
pub fn route_table(redirect: &RedirectOptions, login: AuthRequirement) -> AppResult<RouteTable> {
    validate_page_path("login", &redirect.login)?;
    validate_page_path("callback", &redirect.callback)?;
    if redirect.login == redirect.callback {
        return Err(AppError::Config(
            "login and callback pages must be different paths".to_string(),
        ));
    }

    RouteTable::new()
        .route("/", AuthRequirement::Public)?
        .exact(&redirect.login, login)?
        .exact(&redirect.callback, AuthRequirement::Public)?
        .route("/register", AuthRequirement::Public)?
        .route("/dashboard", AuthRequirement::Required)?
        .route("/account/*", AuthRequirement::Required)
}

fn validate_page_path(name: &str, path: &str) -> AppResult<()> {
    if !path.starts_with('/') || path.contains(['*', '{', '}', ':']) {
        return Err(AppError::Config(format!(
            "{} page must be a plain absolute path, got '{}'",
            name, path
        )));
    }
    if FIXED_PATHS.contains(&path) || FIXED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return Err(AppError::Config(format!(
            "{} page '{}' clashes with a built-in page",
            name, path
        )));
    }
    Ok(())
}

/// Build the application router
///
/// Layers run outermost first: trace, CORS, session lookup, provider
/// redirect, route guard. `/health` and the devtools endpoints skip the
/// session and guard layers; `/api/session` gets a session but no guards.
pub fn router(state: AppState) -> Router {
    let redirect = &state.config.supabase.redirect_options;

    let guarded_pages = Router::new()
        .route("/", get(pages::home))
        .route(&redirect.login, get(pages::login))
        .route(&redirect.callback, get(pages::confirm))
        .route("/register", get(pages::register))
        .route("/dashboard", get(pages::dashboard))
        .route("/account/{*section}", get(pages::account))
        // Static assets (favicon, stylesheets) sit behind the provider layer too
        .fallback_service(ServeDir::new("static"))
        .layer(from_fn_with_state(state.clone(), auth::require_auth))
        .layer(from_fn_with_state(state.clone(), provider::provider_redirect));

    let api = Router::new().route("/api/session", get(session::session_info));

    let mut app = Router::new()
        .merge(guarded_pages)
        .merge(api)
        .layer(from_fn_with_state(state.clone(), session_mw::resolve_session))
        .route("/health", get(health::health_check));

    if state.config.devtools_enabled {
        tracing::info!("Devtools endpoints enabled under /__devtools");
        app = app
            .route("/__devtools/routes", get(devtools::routes))
            .route("/__devtools/config", get(devtools::config));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_table_protects_dashboard_and_account() {
        let table = route_table(&RedirectOptions::default(), AuthRequirement::Public).unwrap();
        for path in ["/dashboard", "/account/settings"] {
            assert!(table.resolve(path).unwrap().meta.requires_auth(), "{path}");
        }
        for path in ["/", "/login", "/confirm", "/register"] {
            assert!(!table.resolve(path).unwrap().meta.requires_auth(), "{path}");
        }
        assert!(table.resolve("/api/session").is_none());
    }

    #[test]
    fn custom_login_path_is_public() {
        let redirect = RedirectOptions {
            login: "/auth/sign-in".to_string(),
            ..RedirectOptions::default()
        };
        let table = route_table(&redirect, AuthRequirement::Public).unwrap();
        assert!(!table.resolve("/auth/sign-in").unwrap().meta.requires_auth());
        assert!(table.resolve("/login").is_none());
    }

    #[test]
    fn login_page_can_be_marked_protected() {
        let table = route_table(&RedirectOptions::default(), AuthRequirement::Required).unwrap();
        assert!(table.resolve("/login").unwrap().meta.requires_auth());
        assert!(!table.resolve("/confirm").unwrap().meta.requires_auth());
    }

    #[test]
    fn login_and_callback_match_literally() {
        let redirect = RedirectOptions {
            login: "/sign.in".to_string(),
            ..RedirectOptions::default()
        };
        let table = route_table(&redirect, AuthRequirement::Public).unwrap();
        assert!(table.resolve("/sign.in").is_some());
        assert!(table.resolve("/signxin").is_none());
    }

    #[test]
    fn rejects_unusable_page_paths() {
        let cases = [
            ("login", "relative"),
            ("login", "/login/*"),
            ("login", "/dashboard"),
            ("callback", "/account/x"),
            ("callback", "/login"),
            ("login", "/health"),
            ("login", "/api/session"),
            ("login", "/__devtools/routes"),
            ("callback", "/__devtools"),
            ("login", "/:id"),
            ("callback", "/users/:id"),
        ];
        for (field, path) in cases {
            let mut redirect = RedirectOptions::default();
            match field {
                "login" => redirect.login = path.to_string(),
                _ => redirect.callback = path.to_string(),
            }
            assert!(
                matches!(
                    route_table(&redirect, AuthRequirement::Public),
                    Err(AppError::Config(_))
                ),
                "{field} = {path}"
            );
        }
    }
}
