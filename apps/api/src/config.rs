use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL_NAME: &str = "llama-3.3-70b-versatile";
const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

/// Application configuration loaded from environment variables.
///
/// API keys are optional: a missing key leaves that capability uninitialized
/// and every request needing it fails until the process is restarted.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub model_name: String,
    pub embedding_api_key: Option<String>,
    pub embedding_base_url: String,
    pub embedding_model: String,
    pub portfolio_owner: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var_or("RUST_LOG", "info"),
            data_dir: PathBuf::from(var_or("DATA_DIR", "data")),
            llm_api_key: var("LLM_API_KEY").or_else(|| var("GROQ_API_KEY")),
            llm_base_url: var_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            model_name: var_or("MODEL_NAME", DEFAULT_MODEL_NAME),
            embedding_api_key: var("EMBEDDING_API_KEY").or_else(|| var("OPENAI_API_KEY")),
            embedding_base_url: var_or("EMBEDDING_BASE_URL", DEFAULT_EMBEDDING_BASE_URL),
            embedding_model: var_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            portfolio_owner: var_or("PORTFOLIO_OWNER", "the candidate"),
            cors_origins: var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model_name, "llama-3.3-70b-versatile");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.llm_api_key.is_none());
        assert!(config.embedding_api_key.is_none());
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_groq_key_alias() {
        let config = config_from(&[("GROQ_API_KEY", "gsk_test")]).unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("gsk_test"));
    }

    #[test]
    fn test_blank_key_treated_as_missing() {
        let config = config_from(&[("EMBEDDING_API_KEY", "  ")]).unwrap();
        assert!(config.embedding_api_key.is_none());
    }

    #[test]
    fn test_cors_origins_split() {
        let config =
            config_from(&[("CORS_ORIGINS", "https://example.com, http://localhost:3000,")]).unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://example.com", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }
}
