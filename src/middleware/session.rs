use crate::error::AppError;
use crate::session::CurrentSession;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = state.sessions.current_session(request.headers()).await?;

    if let Some(session) = &session {
        tracing::debug!(user_id = %session.user.id, "Session resolved");
    }

    request.extensions_mut().insert(CurrentSession(session));
    Ok(next.run(request).await)
}
