use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use registro_core::{today_utc, Candidate, ListUsersResponse, StoredUser};
use std::sync::Arc;

use crate::error::ApiError;
use crate::{health_with_store, register_user, AppState, RegisterError};

/// Handler per POST /api/users
pub async fn create_user(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<Candidate>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredUser>), ApiError> {
    // il corpo deve essere un oggetto JSON; i campi li controlla il contratto di validazione
    let Json(candidate) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;

    let user = register_user(state.store.as_ref(), &candidate, today_utc())
        .await
        .inspect_err(|e| match e {
            RegisterError::Validation(errors) => tracing::warn!(fields = %errors, "registration rejected"),
            RegisterError::DuplicateEmail(_) => tracing::warn!("registration rejected: duplicate email"),
            RegisterError::Store(_) => {}
        })?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler per GET /api/users
pub async fn list_users(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.store.list_all().await?;
    Ok(Json(users))
}

/// Handler per GET /health
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> StatusCode {
    health_with_store(state.store.as_ref()).await
}

/// Handler per GET /
pub async fn root() -> &'static str {
    "API is running..."
}

/// Fallback per le rotte sconosciute.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
