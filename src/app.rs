use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/mode", get(handlers::get_mode))
        .route("/api/query", get(handlers::get_query))
        .route("/api/location", post(handlers::submit_location))
        .with_state(state)
}
