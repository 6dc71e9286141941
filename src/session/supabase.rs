use super::{Session, SessionProvider, User};
use crate::config::SupabaseConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use reqwest::StatusCode;

/// Minimal Supabase Auth client: validates an access token by asking the
/// provider who it belongs to. Refresh and sign-in stay on the provider side.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    url: String,
    key: String,
    cookie_name: String,
}

impl SupabaseClient {
    /// Fails when the project URL or key is missing, like the official
    /// client libraries do.
    pub fn new(config: &SupabaseConfig) -> AppResult<Self> {
        let url = config
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AppError::Config("SUPABASE_URL is required".to_string()))?;
        let key = config
            .key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Config("SUPABASE_KEY is required".to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            cookie_name: config.cookie_name.clone(),
        })
    }

    /// Access token from `Authorization: Bearer ...`, falling back to the
    /// `<prefix>-access-token` cookie.
    pub fn access_token(&self, headers: &HeaderMap) -> Option<String> {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        if let Some(token) = bearer {
            return Some(token.to_string());
        }

        CookieJar::from_headers(headers)
            .get(&format!("{}-access-token", self.cookie_name))
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    }

    /// `GET /auth/v1/user`. A rejected token is `Ok(None)`, not an error.
    pub async fn get_user(&self, access_token: &str) -> AppResult<Option<User>> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.url))
            .header("apikey", &self.key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<User>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Auth provider rejected access token");
                Ok(None)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::ProviderStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl SessionProvider for SupabaseClient {
    async fn current_session(&self, headers: &HeaderMap) -> AppResult<Option<Session>> {
        let Some(access_token) = self.access_token(headers) else {
            return Ok(None);
        };

        let user = self.get_user(&access_token).await?;
        Ok(user.map(|user| Session { user, access_token }))
    }
}
