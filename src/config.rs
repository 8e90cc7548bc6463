// src/config.rs
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Disabled,
    Postgres { url: String },
    JsonLines { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub store: StoreConfig,
    pub sanitize_prompt: bool,
}

impl AppConfig {
    /// Load from the process environment (after `.env` has been applied).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: raw,
            })?,
            None => 3000,
        };

        let store = match (get("DATABASE_URL"), get("INTERACTION_LOG_PATH")) {
            (Some(url), _) => StoreConfig::Postgres { url },
            (None, Some(path)) => StoreConfig::JsonLines { path: PathBuf::from(path) },
            (None, None) => StoreConfig::Disabled,
        };

        let sanitize_prompt = match get("PROMPT_SANITIZE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                key: "PROMPT_SANITIZE".to_string(),
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            store,
            sanitize_prompt,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
