//! # Page Handlers
//!
//! Server-rendered pages. Which of them need a session is declared in
//! [`crate::routes::route_table`], not here; by the time a protected
//! handler runs the guards have already let the request through.

use crate::error::{AppError, AppResult};
use crate::session::{CurrentSession, Session};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use serde_json::json;

pub async fn home(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Html<String>> {
    state.pages.render(
        "home",
        &json!({
            "title": "Home",
            "user": current.get().map(display_name),
            "login": state.config.supabase.redirect_options.login,
        }),
    )
}

pub async fn login(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.pages.render(
        "login",
        &json!({
            "title": "Sign in",
            "callback": state.config.supabase.redirect_options.callback,
        }),
    )
}

pub async fn register(State(state): State<AppState>) -> AppResult<Html<String>> {
    state
        .pages
        .render("register", &json!({ "title": "Create an account" }))
}

/// OAuth callback landing page. The provider's client finishes the
/// sign-in here; the server only renders the page.
pub async fn confirm(State(state): State<AppState>) -> AppResult<Html<String>> {
    state.pages.render("confirm", &json!({ "title": "Confirming" }))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Html<String>> {
    let session = signed_in(&current)?;

    state.pages.render(
        "dashboard",
        &json!({
            "title": "Dashboard",
            "user": display_name(session),
            "user_id": session.user.id,
        }),
    )
}

pub async fn account(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Extension(current): Extension<CurrentSession>,
) -> AppResult<Html<String>> {
    let session = signed_in(&current)?;

    state.pages.render(
        "account",
        &json!({
            "title": "Account",
            "section": section,
            "user": display_name(session),
        }),
    )
}

fn signed_in(current: &CurrentSession) -> AppResult<&Session> {
    current
        .get()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
}

fn display_name(session: &Session) -> &str {
    session.user.email.as_deref().unwrap_or(&session.user.id)
}
