use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, metrics, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/submissions", post(handlers::submit_code))
        .route("/submissions/run", post(handlers::run_samples))
        .route("/submissions/:id", get(handlers::get_submission))
}
