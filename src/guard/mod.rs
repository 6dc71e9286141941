//! # Navigation Guards
//!
//! Two independent layers decide whether a request may reach its page:
//!
//! - [`RouteGuard`]: the per-route rule. A route whose metadata requires
//!   auth redirects to the login page when there is no session.
//! - [`ProviderRedirect`]: the auth provider's own protection. Every path
//!   except login, callback and the exclusion list redirects to login when
//!   there is no session.
//!
//! Both are plain values evaluated against an already-resolved session, so
//! they can be tested without a running provider. The middleware in
//! [`crate::middleware`] wires them into the request pipeline.

pub mod pattern;
pub mod provider;
pub mod route;

pub use pattern::PathPattern;
pub use provider::ProviderRedirect;
pub use route::{AuthRequirement, RouteDescriptor, RouteMeta, RouteTable};

use crate::error::AppError;
use crate::session::Session;
use std::str::FromStr;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

/// What the route guard does when the login page itself requires auth.
///
/// `RedirectAlways` applies the bare rule and sends the login page to
/// itself forever. `ExemptLoginPath` lets it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginLoopPolicy {
    #[default]
    ExemptLoginPath,
    RedirectAlways,
}

impl FromStr for LoginLoopPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exempt" => Ok(Self::ExemptLoginPath),
            "redirect" => Ok(Self::RedirectAlways),
            other => Err(AppError::Config(format!(
                "unknown login loop policy '{}' (expected 'exempt' or 'redirect')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    login_loop: LoginLoopPolicy,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>, login_loop: LoginLoopPolicy) -> Self {
        Self {
            login_path: login_path.into(),
            login_loop,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide whether navigation from `from` to `to` may continue.
    ///
    /// Redirects to the login path iff there is no session and `to`
    /// requires auth, except for the login path itself under
    /// [`LoginLoopPolicy::ExemptLoginPath`].
    pub fn check(
        &self,
        to: &RouteDescriptor,
        from: Option<&RouteDescriptor>,
        session: Option<&Session>,
    ) -> Navigation {
        if session.is_some() || !to.meta.requires_auth() {
            return Navigation::Proceed;
        }

        if self.login_loop == LoginLoopPolicy::ExemptLoginPath && to.path == self.login_path {
            tracing::debug!(to = %to.path, "login page marked as protected, letting it through");
            return Navigation::Proceed;
        }

        tracing::debug!(
            to = %to.path,
            from = from.map(|f| f.path.as_str()).unwrap_or("-"),
            "no session for protected route, redirecting to {}",
            self.login_path
        );
        Navigation::Redirect(self.login_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;

    fn session() -> Session {
        Session {
            user: User {
                id: "8d0fd2b3-9ca7-4dd2-8b7e-3c1f2b0a9e11".to_string(),
                email: Some("alice@example.com".to_string()),
                role: Some("authenticated".to_string()),
            },
            access_token: "token".to_string(),
        }
    }

    fn guards() -> [RouteGuard; 2] {
        [
            RouteGuard::new("/login", LoginLoopPolicy::ExemptLoginPath),
            RouteGuard::new("/login", LoginLoopPolicy::RedirectAlways),
        ]
    }

    fn paths() -> [&'static str; 4] {
        ["/", "/dashboard", "/account/settings", "/register"]
    }

    #[test]
    fn public_routes_always_proceed() {
        let s = session();
        for guard in guards() {
            for path in paths() {
                let to = RouteDescriptor::new(path, AuthRequirement::Public);
                assert_eq!(guard.check(&to, None, None), Navigation::Proceed);
                assert_eq!(guard.check(&to, None, Some(&s)), Navigation::Proceed);
            }
        }
    }

    #[test]
    fn protected_routes_proceed_with_session() {
        let s = session();
        for guard in guards() {
            for path in paths() {
                let to = RouteDescriptor::new(path, AuthRequirement::Required);
                assert_eq!(guard.check(&to, None, Some(&s)), Navigation::Proceed);
            }
        }
    }

    #[test]
    fn protected_routes_redirect_without_session() {
        for guard in guards() {
            for path in paths() {
                let to = RouteDescriptor::new(path, AuthRequirement::Required);
                assert_eq!(
                    guard.check(&to, None, None),
                    Navigation::Redirect("/login".to_string())
                );
            }
        }
    }

    #[test]
    fn redirect_uses_configured_login_path() {
        let guard = RouteGuard::new("/auth/sign-in", LoginLoopPolicy::ExemptLoginPath);
        let to = RouteDescriptor::new("/dashboard", AuthRequirement::Required);
        assert_eq!(
            guard.check(&to, None, None),
            Navigation::Redirect("/auth/sign-in".to_string())
        );
    }

    #[test]
    fn source_route_does_not_change_the_outcome() {
        let guard = RouteGuard::new("/login", LoginLoopPolicy::ExemptLoginPath);
        let to = RouteDescriptor::new("/dashboard", AuthRequirement::Required);
        let from = RouteDescriptor::new("/", AuthRequirement::Public);
        assert_eq!(guard.check(&to, Some(&from), None), guard.check(&to, None, None));
    }

    #[test]
    fn repeated_checks_agree() {
        let s = session();
        for guard in guards() {
            for requires_auth in [AuthRequirement::Required, AuthRequirement::Public] {
                let to = RouteDescriptor::new("/dashboard", requires_auth);
                for current in [None, Some(&s)] {
                    assert_eq!(guard.check(&to, None, current), guard.check(&to, None, current));
                }
            }
        }
    }

    #[test]
    fn protected_login_page_redirects_to_itself_under_redirect_always() {
        let guard = RouteGuard::new("/login", LoginLoopPolicy::RedirectAlways);
        let to = RouteDescriptor::new("/login", AuthRequirement::Required);
        assert_eq!(
            guard.check(&to, None, None),
            Navigation::Redirect("/login".to_string())
        );
    }

    #[test]
    fn protected_login_page_proceeds_under_exempt_policy() {
        let guard = RouteGuard::new("/login", LoginLoopPolicy::ExemptLoginPath);
        let to = RouteDescriptor::new("/login", AuthRequirement::Required);
        assert_eq!(guard.check(&to, None, None), Navigation::Proceed);
    }

    #[test]
    fn parses_login_loop_policy() {
        assert_eq!(
            "exempt".parse::<LoginLoopPolicy>().unwrap(),
            LoginLoopPolicy::ExemptLoginPath
        );
        assert_eq!(
            " Redirect ".parse::<LoginLoopPolicy>().unwrap(),
            LoginLoopPolicy::RedirectAlways
        );
        assert!("sometimes".parse::<LoginLoopPolicy>().is_err());
    }
}
