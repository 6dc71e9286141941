//! # Error Handling
//!
//! Application error type and its conversion into HTTP responses.
//!
//! Most of the request path cannot fail: the route guard only ever decides
//! between "proceed" and "redirect". Errors come from the edges, namely
//! loading configuration and talking to the auth provider.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// The `#[from]` attributes let `?` convert library errors into `AppError`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed configuration
    ///
    /// Raised at startup (bad `PORT`, unknown policy name) and when the
    /// provider client is built without a URL or key.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A route or exclusion pattern that does not compile
    #[error("Invalid path pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Transport-level failure talking to the auth provider
    #[error("Auth provider request failed: {0}")]
    Provider(#[from] reqwest::Error),

    /// The auth provider answered with a status we don't understand
    ///
    /// 401/403 are not errors (they mean "no session"), everything else
    /// outside 2xx ends up here.
    #[error("Auth provider returned {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    /// A page template that does not compile
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    /// A page template that fails to render
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Caller is not logged in (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Convert AppError into an HTTP response
///
/// Provider failures are logged in full but reported to the client as a
/// generic 502 so upstream details don't leak.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Config(_) | AppError::InvalidPattern(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured".to_string())
            }
            AppError::Provider(e) => {
                tracing::error!("Auth provider error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Auth provider unavailable".to_string())
            }
            AppError::ProviderStatus { status, body } => {
                tracing::error!(status, body = %body, "Unexpected auth provider response");
                (StatusCode::BAD_GATEWAY, "Auth provider unavailable".to_string())
            }
            AppError::Template(_) | AppError::Render(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Page unavailable".to_string())
            }
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
