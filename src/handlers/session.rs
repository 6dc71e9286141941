use crate::session::CurrentSession;
use axum::{Extension, Json};
use serde_json::{json, Value};

/// `GET /api/session`: whether the caller is signed in, and as whom.
pub async fn session_info(Extension(current): Extension<CurrentSession>) -> Json<Value> {
    match current.get() {
        Some(session) => Json(json!({
            "authenticated": true,
            "user_id": session.user.id,
            "email": session.user.email
        })),
        None => Json(json!({
            "authenticated": false
        })),
    }
}
