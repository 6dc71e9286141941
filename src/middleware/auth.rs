use crate::guard::{Navigation, RouteDescriptor};
use crate::session::CurrentSession;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::REFERER, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Runs the route guard for paths that have a route definition. Anything
/// else falls through untouched.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(to) = state.routes.resolve(request.uri().path()) else {
        return next.run(request).await;
    };
    let from = source_route(&state, request.headers());
    let session = request
        .extensions()
        .get::<CurrentSession>()
        .and_then(CurrentSession::get);

    match state.route_guard.check(&to, from.as_ref(), session) {
        Navigation::Proceed => next.run(request).await,
        Navigation::Redirect(target) => Redirect::to(&target).into_response(),
    }
}

// The page the navigation started from, if the browser told us and we know it.
fn source_route(state: &AppState, headers: &HeaderMap) -> Option<RouteDescriptor> {
    let referer = headers.get(REFERER)?.to_str().ok()?;
    let uri: Uri = referer.parse().ok()?;
    state.routes.resolve(uri.path())
}
