//! # Configuration Management
//!
//! Configuration is loaded from environment variables once at startup and is
//! read-only afterwards ("12-factor app" style).
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `SUPABASE_URL`: Auth provider project URL (no default)
//! - `SUPABASE_KEY`: Auth provider anon key (no default)
//! - `SUPABASE_REDIRECT`: Enable the provider's redirect protection (default: true)
//! - `SUPABASE_REDIRECT_LOGIN`: Login page (default: /login)
//! - `SUPABASE_REDIRECT_CALLBACK`: OAuth callback page (default: /confirm)
//! - `SUPABASE_REDIRECT_EXCLUDE`: Comma-separated paths or patterns exempt
//!   from the provider's redirect protection (default: /register)
//! - `SUPABASE_COOKIE_NAME`: Prefix of the session cookies (default: sb)
//! - `DEVTOOLS_ENABLED`: Mount the developer endpoints (default: true)
//! - `ROUTE_GUARD_LOGIN_PROTECTED`: Mark the login page as requiring auth (default: false)
//! - `ROUTE_GUARD_LOGIN_LOOP`: `exempt` or `redirect`, what the route guard
//!   does with a protected login page (default: exempt)

use crate::error::{AppError, AppResult};
use crate::guard::{AuthRequirement, LoginLoopPolicy};
use std::env;
use std::fmt;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// Auth provider connection and redirect settings
    pub supabase: SupabaseConfig,

    /// Developer tooling only; has no effect on request handling
    pub devtools_enabled: bool,

    /// Whether the login page's route definition requires auth
    pub login_protected: bool,

    /// How the route guard treats a protected login page
    pub login_loop: LoginLoopPolicy,
}

/// Settings consumed by the auth provider client and its redirect layer
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. "https://abcd.supabase.co"
    ///
    /// Kept as `None` when unset. The provider client decides what a
    /// missing URL means.
    pub url: Option<String>,

    /// Project anon key
    pub key: Option<String>,

    /// Whether the provider redirect layer is active
    pub redirect: bool,

    pub redirect_options: RedirectOptions,

    /// Prefix of the cookies holding the session, e.g. `sb-access-token`
    pub cookie_name: String,
}

/// Where unauthenticated users are sent and which paths are left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectOptions {
    /// Page unauthenticated users are redirected to
    pub login: String,

    /// Page where the provider lands the OAuth flow
    pub callback: String,

    /// Paths or patterns the provider redirect layer never protects
    pub exclude: Vec<String>,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            callback: "/confirm".to_string(),
            exclude: vec!["/register".to_string()],
        }
    }
}

// The key never goes to the logs, only whether it is set.
impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("redirect", &self.redirect)
            .field("redirect_options", &self.redirect_options)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one exists (dotenvy doesn't error if
    /// it is missing), then the process environment.
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// SUPABASE_URL=https://abcd.supabase.co
    /// SUPABASE_KEY=eyJhbGciOi...
    /// SUPABASE_REDIRECT_EXCLUDE=/register,/blog/*
    /// ```
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    ///
    /// `from_env` passes the process environment; tests pass a map.
    /// Empty values count as unset, except the provider credentials, which
    /// are passed through exactly as found.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RedirectOptions::default();

        let port: u16 = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => 8080,
        };

        let exclude = match get("SUPABASE_REDIRECT_EXCLUDE") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.exclude,
        };

        let login_loop = match get("ROUTE_GUARD_LOGIN_LOOP") {
            Some(raw) => raw.parse::<LoginLoopPolicy>()?,
            None => LoginLoopPolicy::default(),
        };

        Ok(Config {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            supabase: SupabaseConfig {
                url: lookup("SUPABASE_URL"),
                key: lookup("SUPABASE_KEY"),
                redirect: parse_bool("SUPABASE_REDIRECT", get("SUPABASE_REDIRECT"), true)?,
                redirect_options: RedirectOptions {
                    login: get("SUPABASE_REDIRECT_LOGIN").unwrap_or(defaults.login),
                    callback: get("SUPABASE_REDIRECT_CALLBACK").unwrap_or(defaults.callback),
                    exclude,
                },
                cookie_name: get("SUPABASE_COOKIE_NAME").unwrap_or_else(|| "sb".to_string()),
            },
            devtools_enabled: parse_bool("DEVTOOLS_ENABLED", get("DEVTOOLS_ENABLED"), true)?,
            login_protected: parse_bool(
                "ROUTE_GUARD_LOGIN_PROTECTED",
                get("ROUTE_GUARD_LOGIN_PROTECTED"),
                false,
            )?,
            login_loop,
        })
    }

    /// Requirement the route table gives the login page
    pub fn login_requirement(&self) -> AuthRequirement {
        if self.login_protected {
            AuthRequirement::Required
        } else {
            AuthRequirement::Public
        }
    }

    /// Get the socket address to bind the server to, e.g. "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(name: &str, raw: Option<String>, default: bool) -> AppResult<bool> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}
