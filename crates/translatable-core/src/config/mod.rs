mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TranslatableError;
use defaults::*;

/// Environment variable consulted when `translator.openai.api_key` is empty.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level Translatable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translatable: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Locale used when a lookup does not name a language.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            log_level: default_log_level(),
        }
    }
}

/// Record store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            db_path: default_db_path(),
        }
    }
}

/// Translator selection and per-backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_translator")]
    pub default: String,
    /// HTTP request timeout for translator calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub openai: Option<OpenAiConfig>,
    pub ollama: Option<OllamaConfig>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default: default_translator(),
            timeout_secs: default_timeout_secs(),
            openai: None,
            ollama: None,
        }
    }
}

/// OpenAI-compatible translator config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: default_openai_model(),
            base_url: default_openai_base_url(),
        }
    }
}

impl OpenAiConfig {
    /// The configured key, or `OPENAI_API_KEY` from the environment when empty.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var(OPENAI_API_KEY_ENV).unwrap_or_default()
    }
}

/// Ollama local translator config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TranslatableError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config {
            translator: TranslatorConfig {
                openai: Some(OpenAiConfig::default()),
                ..Default::default()
            },
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        TranslatableError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, TranslatableError> {
    toml::from_str(content)
        .map_err(|e| TranslatableError::Config(format!("failed to parse config: {}", e)))
}
