//! Axum route handlers for the text cleaning API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cleaning::{
    cleaning_stats, normalize_text, validate_cleaned_text, CleanOptions, CleanedText,
    CleaningStats, QualityReport,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
    #[serde(default)]
    pub options: CleanOptions,
    /// Also run the quality gate over the cleaned text.
    #[serde(default)]
    pub validate: bool,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    #[serde(flatten)]
    pub cleaned: CleanedText,
    pub stats: CleaningStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub text: String,
}

/// POST /api/v1/text/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    state.config.check_text_length("text", &request.text)?;

    let cleaned = normalize_text(&request.text, &request.options);
    let stats = cleaning_stats(&request.text, &cleaned.cleaned_text);
    let quality = request
        .validate
        .then(|| validate_cleaned_text(&cleaned.cleaned_text));

    Ok(Json(NormalizeResponse {
        cleaned,
        stats,
        quality,
    }))
}

/// POST /api/v1/text/validate
///
/// Advisory only: grades the text as given and never rewrites it.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<QualityReport>, AppError> {
    state.config.check_text_length("text", &request.text)?;
    Ok(Json(validate_cleaned_text(&request.text)))
}
