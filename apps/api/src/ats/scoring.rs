//! ATS scoring — keyword overlap between a resume and a job description.
//!
//! Default: `KeywordAtsScorer` (pure-Rust, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn AtsScorer>` so the backend can be swapped at startup
//! without touching handlers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ats::keywords::{extract_keywords, normalize_job_description, normalize_resume};
use crate::ats::vocabulary::{EXPERIENCE_TERMS, SUMMARY_TERMS, TECHNICAL_TERMS};

/// Flat bonus for JDs with enough signal whose resume clears the absolute match floor.
const KEYWORD_BONUS: u32 = 10;
const BONUS_MIN_TOTAL_KEYWORDS: usize = 10;
const BONUS_MIN_MATCHED_KEYWORDS: usize = 5;
const MAX_SCORE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Vocabulary terms the JD asks for, split by whether the resume mentions them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermBreakdown {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub skills: TermBreakdown,
    pub experience: TermBreakdown,
    pub summary: TermBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsScoreResult {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub total_keywords: usize,
    /// Unrounded, before the bonus and clamp.
    pub match_percentage: f64,
    pub analysis: SectionAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handlers.
///
/// Carried in `AppState` as `Arc<dyn AtsScorer>`.
pub trait AtsScorer: Send + Sync {
    fn score(&self, resume_text: &str, jd_text: &str) -> AtsScoreResult;

    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Frequency-filtered keyword overlap plus vocabulary section analysis.
pub struct KeywordAtsScorer;

impl AtsScorer for KeywordAtsScorer {
    fn score(&self, resume_text: &str, jd_text: &str) -> AtsScoreResult {
        compute_ats_score(resume_text, jd_text)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Scores `resume_text` against `jd_text`.
///
/// Algorithm:
/// 1. Resume: compound-term rewrite + boundary repair, then lowercase/strip.
///    JD: lowercase/strip only.
/// 2. Extract keywords from both (frequency ≥ 2, top 50).
/// 3. matched = JD keywords present in the resume keyword set; missing = the rest.
/// 4. score = round(matched / total × 100), +10 when total ≥ 10 and matched ≥ 5,
///    clamped to 100.
/// 5. Section analysis over the fixed vocabularies.
pub fn compute_ats_score(resume_text: &str, jd_text: &str) -> AtsScoreResult {
    let jd_keywords = extract_keywords(&normalize_job_description(jd_text));
    let resume_keywords: HashSet<String> = extract_keywords(&normalize_resume(resume_text))
        .into_iter()
        .collect();

    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = jd_keywords
        .into_iter()
        .partition(|keyword| resume_keywords.contains(keyword));

    let total_keywords = matched_keywords.len() + missing_keywords.len();
    let (score, match_percentage) = assemble_score(matched_keywords.len(), total_keywords);

    debug!(
        "ATS score {score}: {}/{total_keywords} JD keywords matched",
        matched_keywords.len()
    );

    AtsScoreResult {
        score,
        matched_keywords,
        missing_keywords,
        total_keywords,
        match_percentage,
        analysis: analyze_sections(resume_text, jd_text),
    }
}

/// Returns `(score, match_percentage)`.
fn assemble_score(matched: usize, total: usize) -> (u32, f64) {
    let match_percentage = if total > 0 {
        matched as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut score = match_percentage.round() as u32;
    if total >= BONUS_MIN_TOTAL_KEYWORDS && matched >= BONUS_MIN_MATCHED_KEYWORDS {
        score += KEYWORD_BONUS;
    }

    (score.min(MAX_SCORE), match_percentage)
}

/// Substring containment of each vocabulary against lowercased texts. Only terms the JD
/// mentions are classified.
pub fn analyze_sections(resume_text: &str, jd_text: &str) -> SectionAnalysis {
    let resume_lower = resume_text.to_lowercase();
    let jd_lower = jd_text.to_lowercase();

    SectionAnalysis {
        skills: classify_terms(TECHNICAL_TERMS, &resume_lower, &jd_lower),
        experience: classify_terms(EXPERIENCE_TERMS, &resume_lower, &jd_lower),
        summary: classify_terms(SUMMARY_TERMS, &resume_lower, &jd_lower),
    }
}

fn classify_terms(vocabulary: &[&str], resume_lower: &str, jd_lower: &str) -> TermBreakdown {
    let mut breakdown = TermBreakdown::default();
    for &term in vocabulary.iter().filter(|&&term| jd_lower.contains(term)) {
        if resume_lower.contains(term) {
            breakdown.matched.push(term.to_string());
        } else {
            breakdown.missing.push(term.to_string());
        }
    }
    breakdown
}

/// Percentage of `skills` found (case-insensitively) in the deduplicated
/// `ats_keywords`, rounded and clamped to 100.
pub fn skill_overlap_score(skills: &[String], ats_keywords: &[String]) -> u32 {
    let keyword_set: HashSet<String> = ats_keywords.iter().map(|k| k.to_lowercase()).collect();
    let hits = skills
        .iter()
        .filter(|skill| keyword_set.contains(&skill.to_lowercase()))
        .count();

    let percentage = hits as f64 / keyword_set.len().max(1) as f64 * 100.0;
    (percentage.round() as u32).min(MAX_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
