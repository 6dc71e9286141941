//! # Developer Endpoints
//!
//! Read-only views of the route table and redirect configuration, mounted
//! only when `DEVTOOLS_ENABLED` is on. They sit outside the guard layers.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /__devtools/routes`
pub async fn routes(State(state): State<AppState>) -> Json<Value> {
    let routes: Vec<Value> = state
        .routes
        .iter()
        .map(|route| {
            json!({
                "pattern": route.pattern.as_str(),
                "requires_auth": route.meta.requires_auth,
            })
        })
        .collect();

    Json(json!({ "routes": routes }))
}

/// `GET /__devtools/config`. The provider key is never echoed back.
pub async fn config(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let supabase = &config.supabase;
    let redirect = &supabase.redirect_options;

    Json(json!({
        "supabase": {
            "url": supabase.url,
            "key_set": supabase.key.is_some(),
            "redirect": supabase.redirect,
            "redirect_options": {
                "login": redirect.login,
                "callback": redirect.callback,
                "exclude": redirect.exclude,
            },
            "cookie_name": supabase.cookie_name,
        },
        "login_loop": format!("{:?}", config.login_loop),
        "devtools_enabled": config.devtools_enabled,
    }))
}
