use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use crate::AuthError;

/// Generic error body; the only error shape that ever reaches a client.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Converts `AuthError` into a user-facing response.
///
/// Authentication failures become a redirect to the login page; nothing
/// in the response distinguishes a bad signature from an expired token
/// or a store failure. Only exchange and fatal errors carry a body.
#[derive(Debug)]
pub struct AppError(pub AuthError);

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            AuthError::TokenInvalid | AuthError::SessionMissing | AuthError::SessionStore(_) => {
                Redirect::temporary("/login").into_response()
            }
            AuthError::MissingAssertion | AuthError::AssertionInvalid(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: self.0.to_string(),
                }),
            )
                .into_response(),
            AuthError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error".to_owned(),
                }),
            )
                .into_response(),
        }
    }
}
