// ATS scoring: keyword extraction, overlap scoring and vocabulary section analysis.
// Resume text should already have been through `cleaning` when available.

pub mod handlers;
pub mod keywords;
pub mod scoring;
pub mod vocabulary;

pub use scoring::{AtsScoreResult, AtsScorer, KeywordAtsScorer};
