//! Axum route handlers for the ATS scoring API.

use std::panic;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ats::scoring::skill_overlap_score;
use crate::ats::{AtsScoreResult, AtsScorer};
use crate::cleaning::{
    normalize_text, validate_cleaned_text, CleanOptions, CleanedText, QualityReport,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub result: AtsScoreResult,
    pub scorer_backend: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub jd_text: String,
    #[serde(default)]
    pub options: CleanOptions,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// `None` when normalization failed and the raw resume was scored instead.
    pub cleaning: Option<CleanedText>,
    pub cleaning_fallback: bool,
    pub quality: QualityReport,
    pub ats: AtsScoreResult,
    pub scorer_backend: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillOverlapRequest {
    pub skills: Vec<String>,
    pub ats_keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillOverlapResponse {
    pub score: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores the texts exactly as given. Empty inputs are valid and score 0.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    state.config.check_text_length("resume_text", &request.resume_text)?;
    state.config.check_text_length("jd_text", &request.jd_text)?;

    let result = state.scorer.score(&request.resume_text, &request.jd_text);

    Ok(Json(ScoreResponse {
        result,
        scorer_backend: state.scorer.backend().to_string(),
    }))
}

/// POST /api/v1/ats/analyze
///
/// Full pipeline: normalize resume (fail-open) → quality gate → score against the JD.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    state.config.check_text_length("resume_text", &request.resume_text)?;
    state.config.check_text_length("jd_text", &request.jd_text)?;

    let cleaning = clean_or_fallback(|| normalize_text(&request.resume_text, &request.options));

    Ok(Json(build_analysis(
        state.scorer.as_ref(),
        &request.resume_text,
        &request.jd_text,
        cleaning,
    )))
}

/// POST /api/v1/ats/skill-overlap
///
/// Scores an externally produced skills list against an externally produced keyword list.
pub async fn handle_skill_overlap(
    Json(request): Json<SkillOverlapRequest>,
) -> Result<Json<SkillOverlapResponse>, AppError> {
    Ok(Json(SkillOverlapResponse {
        score: skill_overlap_score(&request.skills, &request.ats_keywords),
    }))
}

/// Runs the cleaner; if it panics, logs and returns `None` so the caller can proceed with
/// the raw text.
fn clean_or_fallback<F>(clean: F) -> Option<CleanedText>
where
    F: FnOnce() -> CleanedText + panic::UnwindSafe,
{
    match panic::catch_unwind(clean) {
        Ok(cleaned) => Some(cleaned),
        Err(_) => {
            warn!("Resume normalization failed; scoring the raw text instead");
            None
        }
    }
}

/// Quality gate and score over the cleaned resume, or over `raw_resume` when cleaning
/// fell back.
fn build_analysis(
    scorer: &dyn AtsScorer,
    raw_resume: &str,
    jd_text: &str,
    cleaning: Option<CleanedText>,
) -> AnalyzeResponse {
    let resume_text = cleaning
        .as_ref()
        .map_or(raw_resume, |c| c.cleaned_text.as_str());

    let quality = validate_cleaned_text(resume_text);
    let ats = scorer.score(resume_text, jd_text);

    info!(
        "ATS analysis: score={}, matched={}/{}, quality={}",
        ats.score,
        ats.matched_keywords.len(),
        ats.total_keywords,
        quality.quality_score
    );

    AnalyzeResponse {
        cleaning_fallback: cleaning.is_none(),
        cleaning,
        quality,
        ats,
        scorer_backend: scorer.backend().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::KeywordAtsScorer;

    #[test]
    fn test_clean_or_fallback_returns_cleaned_text() {
        let options = CleanOptions::default();
        let cleaned = clean_or_fallback(|| normalize_text("Led acollaborative team", &options));
        assert_eq!(
            cleaned.map(|c| c.cleaned_text),
            Some("Led a collaborative team".to_string())
        );
    }

    #[test]
    fn test_clean_or_fallback_absorbs_panic() {
        let cleaned = clean_or_fallback(|| panic!("normalizer blew up"));
        assert!(cleaned.is_none());
    }

    #[test]
    fn test_analysis_scores_raw_resume_after_fallback() {
        let resume = "Rust kafka. Rust kafka.";
        let jd = "rust kafka rust kafka";
        let cleaning = clean_or_fallback(|| panic!("normalizer blew up"));

        let response = build_analysis(&KeywordAtsScorer, resume, jd, cleaning);
        assert!(response.cleaning_fallback);
        assert!(response.cleaning.is_none());
        assert_eq!(response.ats.score, 100);
        assert_eq!(response.scorer_backend, "keyword");

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["cleaning_fallback"], true);
        assert!(body["cleaning"].is_null());
    }

    #[test]
    fn test_analysis_uses_cleaned_resume() {
        let cleaning = Some(normalize_text("Rust   kafka", &CleanOptions::default()));
        let response = build_analysis(&KeywordAtsScorer, "ignored", "rust kafka", cleaning);
        assert!(!response.cleaning_fallback);
        assert_eq!(
            response.cleaning.map(|c| c.cleaned_text),
            Some("Rust kafka".to_string())
        );
    }
}
