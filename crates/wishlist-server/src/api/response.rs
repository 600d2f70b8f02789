use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use wishlist_core::WishlistError;

/// Error body of every failed API call
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Wishlist(WishlistError),
    BadRequest(String),
}

impl From<WishlistError> for ApiError {
    fn from(error: WishlistError) -> Self {
        Self::Wishlist(error)
    }
}

/// HTTP status for a service failure
pub fn status_for(error: &WishlistError) -> StatusCode {
    match error {
        WishlistError::NotFound(_) => StatusCode::NOT_FOUND,
        WishlistError::Conflict(_) => StatusCode::CONFLICT,
        WishlistError::InvalidKey(_) => StatusCode::BAD_REQUEST,
        WishlistError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        WishlistError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Wishlist(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!(error = %err, "Wishlist request failed");
                }
                (status, err.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
