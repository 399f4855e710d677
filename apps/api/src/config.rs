use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
/// The API key is resolved separately by `credentials`, since its absence
/// only disables generation.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_api_url: String,
    pub openai_model: String,
    pub max_output_tokens: u32,
    pub job_fetch_timeout_secs: u64,
    pub secrets_dir: PathBuf,
    pub api_key_file: PathBuf,
    /// Restate the structural rules at the end of the user content.
    pub reinforce_structure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            openai_api_url: env_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            max_output_tokens: parse_env("MAX_OUTPUT_TOKENS", 600)?,
            job_fetch_timeout_secs: parse_env("JOB_FETCH_TIMEOUT_SECS", 10)?,
            secrets_dir: PathBuf::from(env_or("SECRETS_DIR", "/run/secrets")),
            api_key_file: PathBuf::from(env_or("OPENAI_API_KEY_FILE", "OPENAI_API_KEY.txt")),
            reinforce_structure: parse_env("REINFORCE_STRUCTURE", true)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
