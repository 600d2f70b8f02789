pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod pages;

use api::state::AppState;
use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::cors::CorsLayer;

#[derive(serde::Serialize)]
struct Health {
    status: String,
}

async fn health() -> axum::Json<Health> {
    axum::Json(Health {
        status: "wishlist is working!".to_string(),
    })
}

/// Assemble the JSON API, the pages and the health check.
pub fn build_router(state: AppState) -> Router {
    // Configure CORS for the JSON API
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(api::router())
        .merge(pages::router(&state))
        .layer(cors)
        .with_state(state)
}
