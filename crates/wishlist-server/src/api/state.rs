use crate::auth::SessionGate;
use crate::backend::WishlistBackend;
use std::sync::Arc;
use wishlist_core::AppCore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub core: Arc<AppCore>,
    pub gate: Arc<SessionGate>,
    /// What the pages use to reach the item service
    pub backend: Arc<dyn WishlistBackend>,
}
