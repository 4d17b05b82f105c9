use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Minimum character count for a gateway response to count as a real
    /// report. Responses below this are treated as failed generations.
    /// Tunable policy knob, not a principled boundary.
    pub min_response_chars: usize,
    /// When a .docx file fails structured extraction, fall back to reading
    /// its raw bytes as UTF-8 (best-effort, may produce garbage).
    pub docx_raw_fallback: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            min_response_chars: std::env::var("MIN_RESPONSE_CHARS")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<usize>()
                .context("MIN_RESPONSE_CHARS must be a non-negative integer")?,
            docx_raw_fallback: std::env::var("DOCX_RAW_FALLBACK")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
