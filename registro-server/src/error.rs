use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use registro_core::{error::codes, Error, FieldErrors, ValidationDetails};

use crate::store::StoreError;
use crate::RegisterError;

/// Errore restituito dagli handler HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(FieldErrors),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("not found")]
    NotFound,
    /// Dettaglio solo nei log, mai nella risposta.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RegisterError> for ApiError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::Validation(errors) => ApiError::Validation(errors),
            RegisterError::DuplicateEmail(_) => ApiError::DuplicateEmail,
            RegisterError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail(_) => ApiError::DuplicateEmail,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                let message = errors.to_string();
                let details = ValidationDetails { fields: errors.into_vec() };
                let mut body = Error::new(codes::VALIDATION_FAILED, message);
                body.details = serde_json::to_value(details).ok();
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::DuplicateEmail => (
                StatusCode::CONFLICT,
                Error::new(codes::DUPLICATE_EMAIL, "Email already registered")
                    .with_details(serde_json::json!({ "field": "email" })),
            ),
            ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, Error::new(codes::INVALID_BODY, msg)),
            ApiError::NotFound => (StatusCode::NOT_FOUND, Error::new(codes::NOT_FOUND, "Not found")),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Error::new(codes::INTERNAL_ERROR, "Something broke!"))
            }
        };
        (status, Json(body)).into_response()
    }
}
