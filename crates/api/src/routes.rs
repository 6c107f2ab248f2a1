use crate::handlers;
use crate::middleware::require_api_key;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/resolve", post(handlers::resolve))
        // Obfuscation alias; same handler.
        .route("/data", post(handlers::resolve))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", protected)
        .with_state(state)
}
