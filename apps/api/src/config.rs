use std::str::FromStr;

use anyhow::{Context, Result};

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Longest accepted resume or job description, in chars.
    pub max_text_chars: usize,
    /// Request body cap enforced by the router.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_text_chars: parse_env("MAX_TEXT_CHARS", 100_000)?,
            max_body_bytes: parse_env("MAX_BODY_BYTES", 2 * 1024 * 1024)?,
        })
    }

    /// Rejects a request field longer than `max_text_chars`.
    pub fn check_text_length(&self, field: &str, text: &str) -> Result<(), AppError> {
        let length = text.chars().count();
        if length > self.max_text_chars {
            return Err(AppError::Validation(format!(
                "{field} is {length} characters; the limit is {}",
                self.max_text_chars
            )));
        }
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
