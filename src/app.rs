use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/stats/sample", post(handlers::load_sample))
        .route("/stats/query", post(handlers::query_range))
        .route("/summarize", get(handlers::summarize_page).post(handlers::summarize))
        .route("/summarize/feedback", post(handlers::submit_feedback))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
