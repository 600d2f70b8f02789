use super::SessionGate;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Gate for the list-management pages.
///
/// A valid session cookie attaches a `SessionContext` to the request;
/// anything else is sent to the login page.
pub async fn require_session(
    State(gate): State<Arc<SessionGate>>,
    mut req: Request,
    next: Next,
) -> Response {
    match gate.session_from_headers(req.headers()) {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        None => {
            debug!(path = %req.uri().path(), "No valid session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
