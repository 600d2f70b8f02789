#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::sync::Arc;
use wishlist_core::AppCore;
use wishlist_server::api::state::AppState;
use wishlist_server::auth::SessionGate;
use wishlist_server::backend::{HttpBackend, LocalBackend, WishlistBackend};
use wishlist_server::build_router;
use wishlist_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wishlist_server=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting wishlist server");

    let config = ServerConfig::load()?;
    let core = Arc::new(AppCore::new(&config.database_path)?);

    let backend: Arc<dyn WishlistBackend> = match &config.api_base_url {
        Some(url) => {
            tracing::info!(api_url = %url, "Pages will call the wishlist API over HTTP");
            Arc::new(HttpBackend::new(url)?)
        }
        None => Arc::new(LocalBackend::new(core.clone())),
    };

    let state = AppState {
        core,
        gate: Arc::new(SessionGate::new(
            &config.password,
            &config.secret_key,
            config.session_ttl_hours,
        )),
        backend,
    };
    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("Wishlist running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
