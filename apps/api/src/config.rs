use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{GeminiSettings, DEFAULT_API_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_CREDENTIAL_STORE_PATH: &str = ".cv-assistant/credentials.json";

/// Application configuration loaded from environment variables.
/// Nothing is required: without `GEMINI_API_KEY` the assistant starts
/// unconfigured and waits for a key to be set through the API.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base_url: String,
    pub credential_store_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base_url: optional_env("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            credential_store_path: optional_env("CREDENTIAL_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIAL_STORE_PATH)),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            base_url: self.gemini_api_base_url.clone(),
            model: self.gemini_model.clone(),
        }
    }
}

/// Unset and blank both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_settings_from_config() {
        let config = Config {
            gemini_api_key: None,
            gemini_model: "gemini-test".to_string(),
            gemini_api_base_url: "http://localhost:1234/v1beta".to_string(),
            credential_store_path: PathBuf::from(DEFAULT_CREDENTIAL_STORE_PATH),
            port: 8080,
            rust_log: "info".to_string(),
        };

        assert_eq!(
            config.gemini_settings().endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }
}
