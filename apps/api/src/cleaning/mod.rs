// Text cleaning: repairs extraction artifacts in raw resume text and grades the result.
// Everything here is pure and synchronous; handlers call it inline.

pub mod handlers;
pub mod normalizer;
pub mod quality;

pub use normalizer::{normalize_text, CleanOptions, CleanedText};
pub use quality::{cleaning_stats, validate_cleaned_text, CleaningStats, QualityReport};
