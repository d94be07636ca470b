pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::cleaning::handlers as cleaning;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> Result<(), AppError> {
    Err(AppError::NotFound(format!("No route for {uri}")))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Text cleaning API
        .route("/api/v1/text/normalize", post(cleaning::handle_normalize))
        .route("/api/v1/text/validate", post(cleaning::handle_validate))
        // ATS scoring API
        .route("/api/v1/ats/score", post(ats::handle_score))
        .route("/api/v1/ats/analyze", post(ats::handle_analyze))
        .route("/api/v1/ats/skill-overlap", post(ats::handle_skill_overlap))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
