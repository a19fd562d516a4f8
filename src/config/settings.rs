//! Application settings management

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{RecapError, Result};

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Completion API settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Transcript chunking settings
    #[serde(default)]
    pub chunking: ChunkingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (groq, openai)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key sent as a bearer credential
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API base URL (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// Sampling temperature, kept low for faithful summaries
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens the model may generate per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds (0 = wait indefinitely)
    #[serde(default)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingSettings {
    /// Maximum chunk length in characters
    #[serde(default = "default_max_len")]
    pub max_len: usize,

    /// Characters carried over from the previous chunk
    #[serde(default = "default_overlap_len")]
    pub overlap_len: usize,

    /// Number of map-phase calls allowed in flight (1 = sequential)
    #[serde(default = "default_map_concurrency")]
    pub map_concurrency: usize,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "groq".to_string()
}

fn default_llm_model() -> String {
    "llama-3.1-70b-versatile".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    1200
}

fn default_max_len() -> usize {
    12_000
}

fn default_overlap_len() -> usize {
    200
}

fn default_map_concurrency() -> usize {
    1
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: 0,
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_len: default_max_len(),
            overlap_len: default_overlap_len(),
            map_concurrency: default_map_concurrency(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut settings = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!("No config file found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(settings)
    }

    /// Parse settings from a specific TOML file, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecapError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            RecapError::Config(msg) => {
                RecapError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| RecapError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment variable overrides.
    ///
    /// `RECAP_API_KEY` and `GROQ_API_KEY` only fill an empty key; `GROQ_MODEL`
    /// and `GROQ_BASE_URL` always win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = non_empty("RECAP_API_KEY").or_else(|| non_empty("GROQ_API_KEY")) {
                self.llm.api_key = key;
            }
        }

        if let Some(model) = non_empty("GROQ_MODEL") {
            self.llm.model = model;
        }

        if let Some(endpoint) = non_empty("GROQ_BASE_URL") {
            self.llm.endpoint = endpoint;
        }
    }

    /// Reject chunking bounds the chunker cannot honor.
    pub fn validate(&self) -> Result<()> {
        let chunking = &self.chunking;
        if chunking.max_len == 0 {
            return Err(RecapError::Config(
                "chunking.max_len must be greater than 0".to_string(),
            ));
        }
        if chunking.overlap_len >= chunking.max_len {
            return Err(RecapError::Config(format!(
                "chunking.overlap_len ({}) must be smaller than chunking.max_len ({})",
                chunking.overlap_len, chunking.max_len
            )));
        }
        if chunking.map_concurrency == 0 {
            return Err(RecapError::Config(
                "chunking.map_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "recap", "recap").ok_or_else(|| {
            RecapError::Config("Could not determine config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| RecapError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
