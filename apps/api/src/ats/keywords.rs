//! Text preparation and keyword extraction for ATS scoring.
//!
//! Resume text may still carry extraction artifacts, so it gets a compound-term rewrite
//! plus the normalizer's boundary repairs before tokenizing. The job description is
//! assumed to be well-formed and is only lowercased and stripped of punctuation.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::ats::vocabulary::{COMPOUND_TERMS, STOPWORDS};
use crate::cleaning::normalizer::{
    space_punctuation_boundaries, split_camel_case, split_digit_letter,
};

/// Upper bound on keywords kept per text.
pub const MAX_KEYWORDS: usize = 50;
/// A token must occur at least this often to count as a keyword.
pub const MIN_FREQUENCY: usize = 2;

static COMPOUND_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    COMPOUND_TERMS
        .iter()
        .map(|(term, replacement)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(term));
            (Regex::new(&pattern).unwrap(), *replacement)
        })
        .collect()
});

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_\s]").unwrap());
static ANY_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// ATS-specific resume pass: compound terms, case/digit splits, punctuation spacing,
/// then a single-space collapse. Case is preserved.
pub fn pre_clean_resume(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (pattern, replacement) in COMPOUND_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, *replacement).into_owned();
    }

    let (cleaned, _) = split_camel_case(&cleaned);
    let (cleaned, _) = split_digit_letter(&cleaned);
    let (cleaned, _) = space_punctuation_boundaries(&cleaned);

    let collapsed = ANY_WHITESPACE.replace_all(&cleaned, " ");
    collapsed.trim().to_string()
}

/// Lowercases and replaces every char that is neither a word char nor whitespace with a
/// space.
pub fn normalize_job_description(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

/// `pre_clean_resume` followed by the same lowercase/punctuation strip the JD gets.
pub fn normalize_resume(text: &str) -> String {
    normalize_job_description(&pre_clean_resume(text))
}

/// Significant tokens of already-normalized text, most frequent first.
///
/// Tokens must be longer than two chars, ASCII-alphabetic and not stopwords, and must
/// occur at least `MIN_FREQUENCY` times. Ties keep first-occurrence order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in text.split_whitespace() {
        if word.len() <= 2 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        let word = word.to_ascii_lowercase();
        if STOPWORD_SET.contains(word.as_str()) {
            continue;
        }

        match index.get(&word) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.retain(|(_, count)| *count >= MIN_FREQUENCY);
    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}
