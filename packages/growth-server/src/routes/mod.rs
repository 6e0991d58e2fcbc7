mod health;
mod training;

use axum::Router;

use crate::response::fallback_handler;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health::router())
        .nest("/training", training::router())
        .fallback(fallback_handler)
        .with_state(state)
}
