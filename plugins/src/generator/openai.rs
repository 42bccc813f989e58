use anyhow::Result;
use async_trait::async_trait;
use gait_core::api as core_api;
use serde::{Deserialize, Serialize};

use crate::http::{parse_json_response, ServiceHttpError};

const SERVICE: &str = "openai";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completions backend.
pub struct OpenAiGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url_chat: String,
}

impl OpenAiGenerator {
    pub fn new(cfg: &core_api::OpenAiConfig, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            url_chat: format!("{}/chat/completions", cfg.base_url.trim_end_matches('/')),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl core_api::AnswerGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = &self.url_chat;
        tracing::debug!(
            target: "gait.generator",
            stage = "generator.openai.in",
            url = %url,
            model = %self.model,
            prompt_len = prompt.len()
        );
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: core_api::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ServiceHttpError::transport(SERVICE, err, url))?;
        let raw = parse_json_response(SERVICE, resp).await?;
        let parsed: ChatResponse = serde_json::from_value(raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse chat completion: {}", e))?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("chat completion returned no content"))?;
        tracing::debug!(
            target: "gait.generator",
            stage = "generator.openai.out",
            answer_len = text.len()
        );
        Ok(text)
    }
}
