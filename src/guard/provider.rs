use super::pattern::PathPattern;
use super::Navigation;
use crate::config::SupabaseConfig;
use crate::error::AppResult;
use crate::session::Session;

/// The auth provider's own redirect protection.
///
/// When enabled, every path without a session is sent to the login page,
/// except the login page, the OAuth callback page and the configured
/// exclusions. Runs independently of [`super::RouteGuard`].
#[derive(Debug, Clone)]
pub struct ProviderRedirect {
    enabled: bool,
    login_path: String,
    exempt: Vec<PathPattern>,
}

impl ProviderRedirect {
    pub fn from_config(config: &SupabaseConfig) -> AppResult<Self> {
        let options = &config.redirect_options;
        let mut exempt = vec![
            PathPattern::literal(&options.login)?,
            PathPattern::literal(&options.callback)?,
        ];
        for pattern in &options.exclude {
            exempt.push(PathPattern::new(pattern)?);
        }

        Ok(Self {
            enabled: config.redirect,
            login_path: options.login.clone(),
            exempt,
        })
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt.iter().any(|p| p.matches(path))
    }

    pub fn check(&self, path: &str, session: Option<&Session>) -> Navigation {
        if !self.enabled || session.is_some() || self.is_exempt(path) {
            return Navigation::Proceed;
        }
        Navigation::Redirect(self.login_path.clone())
    }
}
