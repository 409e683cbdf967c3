//! OpenAI-compatible translator.
//!
//! Works with OpenAI's API and any endpoint speaking the chat completions
//! protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use translatable_core::{config::OpenAiConfig, error::TranslatableError, traits::Translator};

use crate::client::http_client;
use crate::prompt::{clean_reply, system_prompt};

/// Translator backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTranslator {
    /// Create from config values. Fails if the HTTP client cannot be built.
    pub fn from_config(config: &OpenAiConfig, timeout: Duration) -> Result<Self, TranslatableError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: config.base_url.clone(),
            api_key: config.resolved_api_key(),
            model: config.model.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

fn build_request(model: &str, text: &str, target_language: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt(target_language),
            },
            ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ],
        temperature: 0.0,
    }
}

fn first_choice(parsed: ChatCompletionResponse) -> Option<String> {
    parsed
        .choices?
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .map(|m| m.content)
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn produce(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslatableError> {
        if self.api_key.is_empty() {
            return Err(TranslatableError::TranslationService(
                "openai: no API key configured".to_string(),
            ));
        }

        let url = self.url("chat/completions");
        let body = build_request(&self.model, text, target_language);
        let start = Instant::now();
        debug!("openai: POST {url} model={} target={target_language}", self.model);

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TranslatableError::TranslationService(format!("openai request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(TranslatableError::TranslationService(format!(
                "openai returned {status}: {text}"
            )));
        }

        let parsed: ChatCompletionResponse = resp.json().await.map_err(|e| {
            TranslatableError::TranslationService(format!("openai: failed to parse response: {e}"))
        })?;

        let translated = clean_reply("openai", first_choice(parsed))?;
        debug!(
            "openai: translated {} chars in {}ms",
            text.chars().count(),
            start.elapsed().as_millis()
        );
        Ok(translated)
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("openai: no API key configured");
            return false;
        }
        match self
            .client
            .get(self.url("models"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("openai not available: {e}");
                false
            }
        }
    }
}
