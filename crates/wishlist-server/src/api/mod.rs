pub mod body;
pub mod items;
pub mod response;
pub mod state;

pub use response::{ApiError, ErrorBody};

use axum::{
    Router,
    routing::{get, patch},
};
use state::AppState;

/// JSON API over the item service.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishlist/", get(items::list_items))
        .route("/wishlist/random/", get(items::random_item))
        .route(
            "/wishlist/{key}",
            get(items::get_item)
                .put(items::create_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/wishlist/{key}/owned/", patch(items::toggle_owned))
}
