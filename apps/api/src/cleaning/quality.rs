//! Advisory quality gate and before/after statistics for cleaned text.
//!
//! Neither function alters the text; callers decide whether to act on the result.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cleaning::normalizer::char_len;

const MIN_LENGTH: usize = 50;
const MAX_LENGTH: usize = 10_000;
const MAX_SPECIAL_CHAR_RATIO: f64 = 0.1;
const MAX_WHITESPACE_RATIO: f64 = 0.3;
const MAX_ARTIFACTS: usize = 10;
const MIN_AVG_SENTENCE_LENGTH: f64 = 10.0;
const MAX_AVG_SENTENCE_LENGTH: f64 = 200.0;
/// Scores at or above this pass the gate.
pub const PASSING_SCORE: u32 = 70;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub quality_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub original_length: usize,
    pub cleaned_length: usize,
    pub reduction_percentage: f64,
    pub whitespace_reduction: f64,
    pub special_char_reduction: f64,
}

static SPECIAL_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Leftover extraction artifacts: digits fused inside words, camel-case joins, and
/// long space or newline runs.
static ARTIFACTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b[A-Za-z0-9_]+[0-9]+[A-Za-z0-9_]+\b",
        r"\b[a-z]+[A-Z][a-z]+\b",
        r"\s{3,}",
        r"\n{3,}",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Scores cleaned text from 100 down, subtracting a fixed penalty per failed check.
pub fn validate_cleaned_text(text: &str) -> QualityReport {
    let mut issues = Vec::new();
    let mut penalty = 0_u32;
    let length = char_len(text);

    if length < MIN_LENGTH {
        issues.push(format!(
            "Text too short ({length} characters, minimum {MIN_LENGTH})"
        ));
        penalty += 30;
    }

    if length > MAX_LENGTH {
        issues.push(format!(
            "Text too long ({length} characters, maximum {MAX_LENGTH})"
        ));
        penalty += 10;
    }

    if length > 0 {
        let special_ratio = SPECIAL_CHAR.find_iter(text).count() as f64 / length as f64;
        if special_ratio > MAX_SPECIAL_CHAR_RATIO {
            issues.push("Too many special characters".to_string());
            penalty += 20;
        }

        let whitespace_ratio = WHITESPACE.find_iter(text).count() as f64 / length as f64;
        if whitespace_ratio > MAX_WHITESPACE_RATIO {
            issues.push("Too much whitespace".to_string());
            penalty += 15;
        }
    }

    let artifact_count: usize = ARTIFACTS
        .iter()
        .map(|pattern| pattern.find_iter(text).count())
        .sum();
    if artifact_count > MAX_ARTIFACTS {
        issues.push(format!(
            "Multiple PDF parsing artifacts detected ({artifact_count})"
        ));
        penalty += 25;
    }

    if let Some(avg) = average_sentence_length(text) {
        if avg < MIN_AVG_SENTENCE_LENGTH {
            issues.push("Sentences too short".to_string());
            penalty += 10;
        }
        if avg > MAX_AVG_SENTENCE_LENGTH {
            issues.push("Sentences too long".to_string());
            penalty += 10;
        }
    }

    let quality_score = 100_u32.saturating_sub(penalty);

    QualityReport {
        is_valid: quality_score >= PASSING_SCORE,
        issues,
        quality_score,
    }
}

/// Mean char length of the non-blank fragments between sentence terminators.
/// `None` when the text has no such fragment.
fn average_sentence_length(text: &str) -> Option<f64> {
    let lengths: Vec<usize> = SENTENCE_END
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .map(char_len)
        .collect();

    if lengths.is_empty() {
        return None;
    }
    Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
}

/// Percent reductions between the raw and cleaned text. Each percentage is 0 when its
/// base count is 0.
pub fn cleaning_stats(original: &str, cleaned: &str) -> CleaningStats {
    let original_length = char_len(original);
    let cleaned_length = char_len(cleaned);

    let original_whitespace = WHITESPACE.find_iter(original).count();
    let cleaned_whitespace = WHITESPACE.find_iter(cleaned).count();
    let original_special = SPECIAL_CHAR.find_iter(original).count();
    let cleaned_special = SPECIAL_CHAR.find_iter(cleaned).count();

    CleaningStats {
        original_length,
        cleaned_length,
        reduction_percentage: reduction(original_length, cleaned_length),
        whitespace_reduction: reduction(original_whitespace, cleaned_whitespace),
        special_char_reduction: reduction(original_special, cleaned_special),
    }
}

fn reduction(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (before as f64 - after as f64) / before as f64 * 100.0
}
