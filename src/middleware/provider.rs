use crate::guard::Navigation;
use crate::session::CurrentSession;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub async fn provider_redirect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let session = request
        .extensions()
        .get::<CurrentSession>()
        .and_then(CurrentSession::get);
    let navigation = state.provider_redirect.check(request.uri().path(), session);

    match navigation {
        Navigation::Proceed => next.run(request).await,
        Navigation::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), "Provider redirect to {}", target);
            Redirect::to(&target).into_response()
        }
    }
}
