use super::ApiError;
use axum::{
    Form, Json,
    body::Body,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Item request body, accepted as JSON or as a url-encoded form.
///
/// An empty body deserializes to the default value, so PATCH and PUT without
/// a payload behave like a request with every field omitted.
pub struct ItemBody<T>(pub T);

impl<S, T> FromRequest<S> for ItemBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false);

        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|err| ApiError::BadRequest(format!("Failed to read request body: {}", err)))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        if is_json {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| Self(value))
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
        } else {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Self(value))
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
        }
    }
}
