//! Text normalizer — repairs artifacts left behind by PDF/DOCX text extraction.
//!
//! Every stage is a pure function that returns the rewritten text together with the
//! report entries it produced; `normalize_text` runs them in a fixed order and
//! concatenates the entries. Stages that introduce new word boundaries run before the
//! whitespace pass so it can collapse whatever they leave behind.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pipeline toggles. Missing fields fall back to the defaults below when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Keep paragraph breaks. When off, every whitespace run becomes a single space.
    pub preserve_formatting: bool,
    /// Collapse runs of repeated punctuation (`!!!`, `....`).
    pub aggressive_cleaning: bool,
    /// Strip everything outside a conservative ASCII whitelist.
    pub remove_special_chars: bool,
    /// Dictionary fixes, case/digit splits and section-heading canonicalization.
    pub fix_common_issues: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            preserve_formatting: true,
            aggressive_cleaning: true,
            remove_special_chars: false,
            fix_common_issues: true,
        }
    }
}

/// Output of a normalization run. Lengths are counted in chars, not bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedText {
    pub cleaned_text: String,
    pub original_length: usize,
    pub cleaned_length: usize,
    pub issues_fixed: Vec<String>,
}

/// Rewritten text plus the report entries a stage appended.
type StageOutput = (String, Vec<String>);

// ────────────────────────────────────────────────────────────────────────────
// Pattern tables
// ────────────────────────────────────────────────────────────────────────────

/// Known word pairs that extraction glues together.
static SPECIFIC_FIXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bacollaborative\b", "a collaborative"),
        (r"\balgorithmbased\b", "algorithm based"),
        (r"\bonuser\b", "on user"),
        (r"\bsimilarityto\b", "similarity to"),
        (r"\bgenerate([0-9]+)\b", "generate $1"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Heading variants, matched only when they occupy a whole line.
static SECTION_HEADINGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("professional summary|summary|profile|objective", "SUMMARY"),
        (
            "professional experience|work experience|experience|work history|employment history|employment",
            "EXPERIENCE",
        ),
        ("education|academic background|academics", "EDUCATION"),
        ("technical skills|core skills|skills", "SKILLS"),
        ("projects|portfolio", "PROJECTS"),
        ("certifications|certificates", "CERTIFICATIONS"),
        ("awards|achievements|accomplishments", "AWARDS"),
        ("language skills|languages", "LANGUAGES"),
        ("references|reference", "REFERENCES"),
    ]
    .into_iter()
    .map(|(variants, canonical)| {
        let pattern = format!(r"(?mi)^[ \t]*(?:{variants})[ \t]*:?[ \t\r]*$");
        (Regex::new(&pattern).unwrap(), canonical)
    })
    .collect()
});

static CAMEL_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z]+)([A-Z])([a-z]+)\b").unwrap());
static DIGIT_LETTER_JOIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]+)([a-zA-Z]+)\b").unwrap());

static LONG_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{3,}").unwrap());
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());
static TABS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\t+").unwrap());
static CARRIAGE_RETURN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n?").unwrap());
static ANY_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SENTENCE_JOIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.!?])([A-Z])").unwrap());
static CLAUSE_JOIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([,;:])([A-Z])").unwrap());

static DISALLOWED_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^A-Za-z0-9_\s\-.,!?;:()"'&@#$%]"#).unwrap());
static NON_ASCII: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\x00-\x7F]").unwrap());

/// Punctuation whose repeated runs collapse to one char. `+`, `/`, `\`, `:`, `_` and
/// brackets are left out so `C++`, URLs, paths, `::`, `__init__` and nested parentheses
/// survive.
const COLLAPSIBLE_PUNCTUATION: &[char] = &[
    '.', '!', '?', ',', ';', '-', '=', '*', '#', '@', '&', '%', '$', '^', '~', '`', '|', '"',
    '\'',
];

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Runs the cleaning pipeline over raw extracted text. Never fails.
pub fn normalize_text(text: &str, options: &CleanOptions) -> CleanedText {
    let mut cleaned = text.to_string();
    let mut issues_fixed = Vec::new();

    if options.fix_common_issues {
        cleaned = absorb(&mut issues_fixed, fix_common_issues(&cleaned));
    }
    cleaned = absorb(
        &mut issues_fixed,
        clean_whitespace(&cleaned, options.preserve_formatting),
    );
    cleaned = absorb(&mut issues_fixed, fix_word_boundaries(&cleaned));
    if options.aggressive_cleaning {
        cleaned = absorb(&mut issues_fixed, collapse_repeated_punctuation(&cleaned));
    }
    if options.remove_special_chars {
        cleaned = absorb(&mut issues_fixed, remove_special_characters(&cleaned));
    }
    cleaned = absorb(&mut issues_fixed, final_cleanup(&cleaned));

    let result = CleanedText {
        original_length: char_len(text),
        cleaned_length: char_len(&cleaned),
        cleaned_text: cleaned,
        issues_fixed,
    };

    debug!(
        "Normalized text: {} -> {} chars, {} report entries",
        result.original_length,
        result.cleaned_length,
        result.issues_fixed.len()
    );

    result
}

fn absorb(issues_fixed: &mut Vec<String>, (text, issues): StageOutput) -> String {
    issues_fixed.extend(issues);
    text
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Stages
// ────────────────────────────────────────────────────────────────────────────

/// Stage 1: dictionary fixes, case/digit splits, heading canonicalization.
fn fix_common_issues(text: &str) -> StageOutput {
    let mut issues = Vec::new();

    let (mut cleaned, fixes) = apply_rule_table(text, &SPECIFIC_FIXES);
    if fixes > 0 {
        issues.push(format!("Fixed {fixes} specific PDF parsing issues"));
    }

    let (next, splits) = split_camel_case(&cleaned);
    cleaned = next;
    if splits > 0 {
        issues.push(format!("Split {splits} joined lowercase/uppercase words"));
    }

    let (next, splits) = split_digit_letter(&cleaned);
    cleaned = next;
    if splits > 0 {
        issues.push(format!("Separated {splits} numbers joined to words"));
    }

    let (next, headings) = apply_rule_table(&cleaned, &SECTION_HEADINGS);
    cleaned = next;
    if headings > 0 {
        issues.push(format!("Normalized {headings} resume sections"));
    }

    (cleaned, issues)
}

/// Applies each `(pattern, replacement)` in order; returns how many rules changed the text.
fn apply_rule_table(text: &str, rules: &[(Regex, &'static str)]) -> (String, usize) {
    let mut cleaned = text.to_string();
    let mut fired = 0;
    for (pattern, replacement) in rules {
        let next = pattern.replace_all(&cleaned, *replacement).into_owned();
        if next != cleaned {
            fired += 1;
            cleaned = next;
        }
    }
    (cleaned, fired)
}

/// `dashboardsUsing` → `dashboards Using`, only when both fragments exceed two chars so
/// `iPhone` and `eBay` stay intact. Returns the number of splits.
pub(crate) fn split_camel_case(text: &str) -> (String, usize) {
    let mut splits = 0;
    let cleaned = CAMEL_JOIN.replace_all(text, |caps: &Captures| {
        let (head, upper, tail) = (&caps[1], &caps[2], &caps[3]);
        if head.len() > 2 && tail.len() > 2 {
            splits += 1;
            format!("{head} {upper}{tail}")
        } else {
            caps[0].to_string()
        }
    });
    (cleaned.into_owned(), splits)
}

/// `5years` → `5 years`; short unit suffixes like `10x` or `3D` are kept.
pub(crate) fn split_digit_letter(text: &str) -> (String, usize) {
    let mut splits = 0;
    let cleaned = DIGIT_LETTER_JOIN.replace_all(text, |caps: &Captures| {
        let (digits, letters) = (&caps[1], &caps[2]);
        if letters.len() > 2 {
            splits += 1;
            format!("{digits} {letters}")
        } else {
            caps[0].to_string()
        }
    });
    (cleaned.into_owned(), splits)
}

/// Stage 2.
fn clean_whitespace(text: &str, preserve_formatting: bool) -> StageOutput {
    let mut cleaned = LONG_WHITESPACE_RUN.replace_all(text, " ").into_owned();
    cleaned = BLANK_LINE_RUN.replace_all(&cleaned, "\n\n").into_owned();
    cleaned = TABS.replace_all(&cleaned, " ").into_owned();
    cleaned = CARRIAGE_RETURN.replace_all(&cleaned, "\n").into_owned();
    if !preserve_formatting {
        cleaned = ANY_WHITESPACE.replace_all(&cleaned, " ").into_owned();
    }
    let cleaned = cleaned.trim().to_string();

    let issues = if char_len(&cleaned) != char_len(text) {
        vec!["Cleaned excessive whitespace".to_string()]
    } else {
        vec![]
    };
    (cleaned, issues)
}

/// Inserts the missing space in `done.Next` and `tools,Python`. Returns how many of the
/// two boundary categories fired.
pub(crate) fn space_punctuation_boundaries(text: &str) -> (String, usize) {
    let mut cleaned = text.to_string();
    let mut fired = 0;
    for pattern in [&*SENTENCE_JOIN, &*CLAUSE_JOIN] {
        let next = pattern.replace_all(&cleaned, "$1 $2").into_owned();
        if next != cleaned {
            fired += 1;
            cleaned = next;
        }
    }
    (cleaned, fired)
}

/// Stage 3.
fn fix_word_boundaries(text: &str) -> StageOutput {
    let (cleaned, fired) = space_punctuation_boundaries(text);
    let issues = if fired > 0 {
        vec![format!("Fixed {fired} word boundary issues")]
    } else {
        vec![]
    };
    (cleaned, issues)
}

/// Stage 4: `!!!` → `!`.
fn collapse_repeated_punctuation(text: &str) -> StageOutput {
    let mut cleaned = String::with_capacity(text.len());
    let mut runs = 0;
    let mut previous: Option<char> = None;
    let mut in_run = false;

    for c in text.chars() {
        if previous == Some(c) && COLLAPSIBLE_PUNCTUATION.contains(&c) {
            if !in_run {
                runs += 1;
                in_run = true;
            }
            continue;
        }
        in_run = false;
        previous = Some(c);
        cleaned.push(c);
    }

    let issues = if runs > 0 {
        vec![format!("Collapsed {runs} repeated punctuation runs")]
    } else {
        vec![]
    };
    (cleaned, issues)
}

/// Stage 5, opt-in. Each sub-rule that changes the text reports separately.
fn remove_special_characters(text: &str) -> StageOutput {
    let mut issues = Vec::new();

    let disallowed = DISALLOWED_CHAR.find_iter(text).count();
    let mut cleaned = DISALLOWED_CHAR.replace_all(text, " ").into_owned();
    if disallowed > 0 {
        issues.push(format!("Replaced {disallowed} disallowed special characters"));
    }

    let non_ascii = NON_ASCII.find_iter(&cleaned).count();
    if non_ascii > 0 {
        cleaned = NON_ASCII.replace_all(&cleaned, " ").into_owned();
        issues.push(format!("Replaced {non_ascii} non-ASCII characters"));
    }

    let collapsed = ANY_WHITESPACE.replace_all(&cleaned, " ").into_owned();
    if collapsed != cleaned {
        issues.push("Collapsed whitespace left by removed characters".to_string());
        cleaned = collapsed;
    }

    (cleaned, issues)
}

/// Stage 6. Always reports, even when nothing changed.
fn final_cleanup(text: &str) -> StageOutput {
    let cleaned = BLANK_LINE_RUN.replace_all(text.trim(), "\n\n");
    (
        cleaned.trim().to_string(),
        vec!["Applied final cleanup".to_string()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> CleanedText {
        normalize_text(text, &CleanOptions::default())
    }

    #[test]
    fn test_default_options() {
        let options = CleanOptions::default();
        assert!(options.preserve_formatting);
        assert!(options.aggressive_cleaning);
        assert!(!options.remove_special_chars);
        assert!(options.fix_common_issues);
    }

    #[test]
    fn test_options_deserialize_with_partial_fields() {
        let options: CleanOptions =
            serde_json::from_str(r#"{"remove_special_chars": true}"#).unwrap();
        assert!(options.remove_special_chars);
        assert!(options.fix_common_issues);
        assert!(options.preserve_formatting);
    }

    #[test]
    fn test_fixes_known_joined_words() {
        let result = clean("Worked in acollaborative team on an algorithmbased ranker");
        assert!(result.cleaned_text.contains("a collaborative team"));
        assert!(result.cleaned_text.contains("algorithm based ranker"));
        assert!(result
            .issues_fixed
            .contains(&"Fixed 2 specific PDF parsing issues".to_string()));
    }

    #[test]
    fn test_single_dictionary_fix_reports_count() {
        let result = clean("acollaborative");
        assert_eq!(result.cleaned_text, "a collaborative");
        assert!(result
            .issues_fixed
            .iter()
            .any(|issue| issue.contains("Fixed 1")));
    }

    #[test]
    fn test_generate_digits_fix_keeps_number() {
        let result = clean("Helped generate40 leads");
        assert!(result.cleaned_text.contains("generate 40 leads"));
    }

    #[test]
    fn test_camel_case_split_requires_long_fragments() {
        let (text, splits) = split_camel_case("Built dashboardsUsing React on iPhone and eBay");
        assert_eq!(text, "Built dashboards Using React on iPhone and eBay");
        assert_eq!(splits, 1);
    }

    #[test]
    fn test_digit_letter_split_skips_short_suffixes() {
        let (text, splits) = split_digit_letter("5years with 3D tools, 10x faster");
        assert_eq!(text, "5 years with 3D tools, 10x faster");
        assert_eq!(splits, 1);
    }

    #[test]
    fn test_whitespace_collapse_and_line_endings() {
        let result = clean("Rust\t\tengineer\r\nGo     developer");
        assert_eq!(result.cleaned_text, "Rust engineer\nGo developer");
        assert!(result
            .issues_fixed
            .contains(&"Cleaned excessive whitespace".to_string()));
    }

    #[test]
    fn test_paragraph_breaks_are_preserved() {
        let result = clean("First paragraph.\n\nSecond paragraph.");
        assert_eq!(result.cleaned_text, "First paragraph.\n\nSecond paragraph.");
        assert!(!result
            .issues_fixed
            .contains(&"Cleaned excessive whitespace".to_string()));
    }

    #[test]
    fn test_flatten_when_formatting_not_preserved() {
        let options = CleanOptions {
            preserve_formatting: false,
            ..CleanOptions::default()
        };
        let result = normalize_text("Rust engineer\n\nBerlin based", &options);
        assert_eq!(result.cleaned_text, "Rust engineer Berlin based");
    }

    #[test]
    fn test_word_boundaries_fixed() {
        let result = clean("Shipped v2.Led team;Owned infra");
        assert_eq!(result.cleaned_text, "Shipped v2. Led team; Owned infra");
        assert!(result
            .issues_fixed
            .contains(&"Fixed 2 word boundary issues".to_string()));
    }

    #[test]
    fn test_repeated_punctuation_collapsed() {
        let result = clean("Great results!!! Really....");
        assert_eq!(result.cleaned_text, "Great results! Really.");
        assert!(result
            .issues_fixed
            .contains(&"Collapsed 2 repeated punctuation runs".to_string()));
    }

    #[test]
    fn test_repeated_punctuation_keeps_cpp_and_urls() {
        let result = clean("C++ developer, see https://example.com");
        assert_eq!(result.cleaned_text, "C++ developer, see https://example.com");
    }

    #[test]
    fn test_repeated_punctuation_keeps_brackets_and_underscores() {
        let result = clean("Rust (async (tokio)) and def __init__(self)");
        assert_eq!(result.cleaned_text, "Rust (async (tokio)) and def __init__(self)");
        assert!(!result
            .issues_fixed
            .iter()
            .any(|issue| issue.starts_with("Collapsed")));
    }

    #[test]
    fn test_trimmed_edges_count_as_whitespace_cleanup() {
        let result = clean("  Senior engineer");
        assert_eq!(result.cleaned_text, "Senior engineer");
        assert_eq!(
            result.issues_fixed,
            vec!["Cleaned excessive whitespace", "Applied final cleanup"]
        );
    }

    #[test]
    fn test_aggressive_cleaning_can_be_disabled() {
        let options = CleanOptions {
            aggressive_cleaning: false,
            ..CleanOptions::default()
        };
        let result = normalize_text("Wow!!!", &options);
        assert_eq!(result.cleaned_text, "Wow!!!");
    }

    #[test]
    fn test_special_characters_removed_when_enabled() {
        let options = CleanOptions {
            remove_special_chars: true,
            ..CleanOptions::default()
        };
        let result = normalize_text("Rust • Go ★ café", &options);
        assert_eq!(result.cleaned_text, "Rust Go caf");
        assert!(result.cleaned_text.is_ascii());
        assert!(result
            .issues_fixed
            .iter()
            .any(|issue| issue.starts_with("Replaced 3 disallowed")));
    }

    #[test]
    fn test_special_characters_kept_by_default() {
        let result = clean("Rust • Go");
        assert_eq!(result.cleaned_text, "Rust • Go");
    }

    #[test]
    fn test_section_headings_canonicalized() {
        let result = clean("Work History\nAcme Corp\nTechnical Skills:\nRust");
        assert_eq!(result.cleaned_text, "EXPERIENCE\nAcme Corp\nSKILLS\nRust");
        assert!(result
            .issues_fixed
            .contains(&"Normalized 2 resume sections".to_string()));
    }

    #[test]
    fn test_heading_words_inside_prose_untouched() {
        let result = clean("My profile lists relevant experience");
        assert_eq!(result.cleaned_text, "My profile lists relevant experience");
    }

    #[test]
    fn test_fix_common_issues_can_be_disabled() {
        let options = CleanOptions {
            fix_common_issues: false,
            ..CleanOptions::default()
        };
        let result = normalize_text("acollaborative", &options);
        assert_eq!(result.cleaned_text, "acollaborative");
    }

    #[test]
    fn test_empty_input_only_reports_final_cleanup() {
        let result = clean("");
        assert_eq!(result.cleaned_text, "");
        assert_eq!(result.original_length, 0);
        assert_eq!(result.cleaned_length, 0);
        assert_eq!(result.issues_fixed, vec!["Applied final cleanup".to_string()]);
    }

    #[test]
    fn test_final_cleanup_entry_always_last() {
        let result = clean("Already clean text.");
        assert_eq!(
            result.issues_fixed.last().map(String::as_str),
            Some("Applied final cleanup")
        );
    }

    #[test]
    fn test_lengths_count_chars() {
        let result = clean("  café  ");
        assert_eq!(result.original_length, 8);
        assert_eq!(result.cleaned_length, 4);
    }

    #[test]
    fn test_second_pass_fires_no_whitespace_fix() {
        let messy = "  SUMMARY\r\n\r\n\r\nSenior engineer   with 5years.Built\tdashboardsUsing Rust!!\n\n\n\nSkills ";
        let first = clean(messy);
        let second = clean(&first.cleaned_text);
        assert_eq!(second.cleaned_text, first.cleaned_text);
        assert!(!second
            .issues_fixed
            .contains(&"Cleaned excessive whitespace".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let text = "Led acollaborative team.Shipped 3features";
        assert_eq!(clean(text), clean(text));
    }
}
