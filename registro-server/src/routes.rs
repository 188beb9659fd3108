use axum::{middleware, routing::get, Extension, Router};
use std::sync::Arc;

use crate::controllers;
use crate::cors;
use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(controllers::root))
        .route("/health", get(controllers::health))
        .route("/api/users", get(controllers::list_users).post(controllers::create_user))
        .fallback(controllers::not_found)
        .layer(Extension(state.clone()));

    // il layer CORS sta all'esterno, così copre anche i preflight su rotte senza OPTIONS
    match state.allowed_origin.clone() {
        Some(origin) => router.layer(middleware::from_fn_with_state(origin, cors::cors)),
        None => router,
    }
}
