//! Ollama local model translator.
//!
//! Connects to a locally running Ollama server. No API key required.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use translatable_core::{config::OllamaConfig, error::TranslatableError, traits::Translator};

use crate::client::http_client;
use crate::prompt::{clean_reply, system_prompt};

/// Translator backed by a local Ollama server.
pub struct OllamaTranslator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaTranslator {
    /// Create from config values. Fails if the HTTP client cannot be built.
    pub fn from_config(config: &OllamaConfig, timeout: Duration) -> Result<Self, TranslatableError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

// --- Serde types ---

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaChatMessage>,
    stream: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct OllamaChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaChatMessage>,
}

fn build_request(model: &str, text: &str, target_language: &str) -> OllamaChatRequest {
    OllamaChatRequest {
        model: model.to_string(),
        messages: vec![
            OllamaChatMessage {
                role: "system".to_string(),
                content: Some(system_prompt(target_language)),
            },
            OllamaChatMessage {
                role: "user".to_string(),
                content: Some(text.to_string()),
            },
        ],
        stream: false,
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn produce(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatableError> {
        let url = self.url("api/chat");
        let body = build_request(&self.model, text, target_language);
        debug!("ollama: POST {url} model={} target={target_language}", self.model);

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TranslatableError::TranslationService(format!("ollama request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(TranslatableError::TranslationService(format!(
                "ollama returned {status}: {text}"
            )));
        }

        let parsed: OllamaChatResponse = resp.json().await.map_err(|e| {
            TranslatableError::TranslationService(format!("ollama: failed to parse response: {e}"))
        })?;

        clean_reply("ollama", parsed.message.and_then(|m| m.content))
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.url("api/tags")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("ollama not available: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_translator_from_config() {
        let t = OllamaTranslator::from_config(&OllamaConfig::default(), Duration::from_secs(5)).unwrap();
        assert_eq!(t.name(), "ollama");
        assert_eq!(t.model, "llama3");
        assert_eq!(t.url("api/chat"), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_build_request_disables_streaming() {
        let req = build_request("llama3", "Good morning", "fr");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Good morning");
    }

    #[test]
    fn test_ollama_response_parsing() {
        let json = r#"{"model":"llama3","message":{"role":"assistant","content":" Bonjour "},"done":true}"#;
        let resp: OllamaChatResponse = serde_json::from_str(json).unwrap();
        let text = clean_reply("ollama", resp.message.and_then(|m| m.content)).unwrap();
        assert_eq!(text, "Bonjour");
    }

    #[test]
    fn test_ollama_response_without_message() {
        let resp: OllamaChatResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(resp.message.is_none());
    }
}
