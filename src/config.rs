//! Configuration loading and management for summa-digest.
//!
//! Loads settings from `summa.toml` with environment variable overrides for sensitive data.
//! Every section has defaults, so a missing file yields a config pointed at a local
//! OpenAI-compatible endpoint (Ollama).

use crate::chunker::DEFAULT_MAX_WORDS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default number of model attempts per chunk
pub const MAX_RETRIES: u32 = 2;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Which model backend the agent talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Any server implementing the OpenAI chat completions API
    OpenAi,
    Gemini,
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// LLM provider: "openai" or "gemini"
    pub provider: String,
    /// Model identifier (e.g., "llama3.2:1b", "gemini-2.0-flash")
    pub model: String,
    /// Base URL for OpenAI-compatible providers
    pub base_url: String,
    /// Model attempts per chunk before giving up on it
    pub max_attempts: u32,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout_secs: u64,
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum words per chunk (soft bound for single long sentences)
    pub max_words: usize,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub gemini_key: Option<String>,
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (summa.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no summa.toml found, using defaults");
                let mut config = Config::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Override API keys from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api.gemini_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("summa.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("summa")
            .join("summa.toml");
        home_config.exists().then_some(home_config)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider()?;
        if self.chunking.max_words == 0 {
            return Err(ConfigError::Invalid(
                "chunking.max_words must be greater than 0".to_string(),
            ));
        }
        if self.agent.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "agent.max_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured provider
    pub fn provider(&self) -> Result<Provider, ConfigError> {
        match self.agent.provider.as_str() {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    /// Get the API key for the configured provider.
    ///
    /// OpenAI-compatible servers such as Ollama run without a key, so only
    /// Gemini treats a missing key as an error.
    pub fn api_key(&self) -> Result<Option<&str>, ConfigError> {
        match self.provider()? {
            Provider::Gemini => self
                .api
                .gemini_key
                .as_deref()
                .map(Some)
                .ok_or_else(|| ConfigError::MissingApiKey("gemini".to_string())),
            Provider::OpenAi => Ok(self.api.openai_key.as_deref()),
        }
    }
}

impl AgentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "llama3.2:1b".to_string(),
            base_url: "http://localhost:11434/v1".to_string(),
            max_attempts: MAX_RETRIES,
            request_timeout_secs: 120,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}
