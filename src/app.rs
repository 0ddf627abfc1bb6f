use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/groups", get(handlers::get_groups))
        .route("/api/rate", get(handlers::get_rate))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/load", post(handlers::load))
        .with_state(state)
}
