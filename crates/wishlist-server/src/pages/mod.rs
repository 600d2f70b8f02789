//! Login gate and the server-rendered list-management page.

pub mod forms;
pub mod render;

use crate::api::response::status_for;
use crate::api::state::AppState;
use crate::auth::{AuthError, SessionContext, require_session};
use axum::{
    Extension, Form, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use forms::{FormAction, ItemForm, LoginForm};
use render::ListView;
use tracing::{error, info, warn};
use wishlist_core::WishlistError;

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/list", get(list_page).post(submit_item))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_session,
        ));

    Router::new()
        .route("/", get(|| async { Redirect::to("/list") }))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .merge(protected)
}

async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.gate.session_from_headers(&headers).is_some() {
        return Redirect::to("/list").into_response();
    }
    Html(render::login_page(None)).into_response()
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.gate.login(&form.password) {
        Ok(session) => {
            info!(expires_at = %session.expires_at, "Session opened");
            (
                [(header::SET_COOKIE, state.gate.session_cookie(&session))],
                Redirect::to("/list"),
            )
                .into_response()
        }
        Err(AuthError::InvalidCredential) => {
            warn!("Rejected login attempt");
            (
                StatusCode::UNAUTHORIZED,
                Html(render::login_page(Some("Wrong password"))),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "Failed to open session");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::login_page(Some("Could not sign in, try again"))),
            )
                .into_response()
        }
    }
}

async fn logout(State(state): State<AppState>) -> Response {
    info!("Session closed");
    (
        [(header::SET_COOKIE, state.gate.logout_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

async fn list_page(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    render_list(&state, &session, None, StatusCode::OK).await
}

async fn submit_item(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<ItemForm>,
) -> Response {
    let key = form.key();
    if key.trim().is_empty() {
        return render_list(
            &state,
            &session,
            Some("Item key is required".to_string()),
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    let action = form.action();
    let backend = &state.backend;
    let result = match action {
        FormAction::Create => backend.create(key, form.spec()).await.map(drop),
        FormAction::Edit => backend.update(key, form.patch()).await.map(drop),
        FormAction::Delete => backend.delete(key).await,
        FormAction::Status => backend.toggle_owned(key).await.map(drop),
    };

    match result {
        Ok(()) => Redirect::to("/list").into_response(),
        Err(err) => {
            warn!(key = %key, action = ?action, error = %err, "Wishlist form action failed");
            render_list(&state, &session, Some(err.to_string()), status_for(&err)).await
        }
    }
}

async fn render_list(
    state: &AppState,
    session: &SessionContext,
    notice: Option<String>,
    status: StatusCode,
) -> Response {
    let (wanted, owned) = match state.backend.partition().await {
        Ok(partitions) => partitions,
        Err(err) => {
            error!(error = %err, "Failed to load wishlist");
            let message = html_escape::encode_text(&err.to_string()).to_string();
            return (status_for(&err), Html(format!("<p>{}</p>", message))).into_response();
        }
    };

    let suggestion = match state.backend.pick_random_unowned().await {
        Ok(item) => Some(item),
        Err(WishlistError::NotFound(_)) => None,
        Err(err) => {
            warn!(error = %err, "Failed to pick a suggestion");
            None
        }
    };

    let view = ListView {
        wanted,
        owned,
        suggestion,
        notice,
        session_expires_at: session.expires_at,
    };
    (status, Html(render::list_page(&view))).into_response()
}
