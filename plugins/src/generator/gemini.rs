use anyhow::Result;
use async_trait::async_trait;
use gait_core::api as core_api;
use serde::{Deserialize, Serialize};

use crate::http::{parse_json_response, ServiceHttpError};

const SERVICE: &str = "gemini";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Google Generative Language `generateContent` backend.
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url_generate: String,
}

impl GeminiGenerator {
    pub fn new(cfg: &core_api::GeminiConfig, timeout_ms: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            url_generate: format!(
                "{}/models/{}:generateContent",
                cfg.base_url.trim_end_matches('/'),
                cfg.model
            ),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl core_api::AnswerGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = &self.url_generate;
        tracing::debug!(
            target: "gait.generator",
            stage = "generator.gemini.in",
            url = %url,
            prompt_len = prompt.len()
        );
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ServiceHttpError::transport(SERVICE, err, url))?;
        let raw = parse_json_response(SERVICE, resp).await?;
        let parsed: GenerateResponse = serde_json::from_value(raw)
            .map_err(|e| ServiceHttpError::decode(SERVICE, url, e.to_string()))?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            anyhow::bail!("generateContent returned no text");
        }
        tracing::debug!(
            target: "gait.generator",
            stage = "generator.gemini.out",
            answer_len = text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gait_core::api::AnswerGenerator;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn cfg(base_url: String) -> core_api::GeminiConfig {
        core_api::GeminiConfig {
            api_key: "g-key".to_string(),
            base_url,
            model: "gemini-1.5-flash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_joins_parts() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "g-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "PROMPT"}]}]
            })))
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"A "},{"text":"deer."}],"role":"model"}}]}"#,
            )
            .create_async()
            .await;

        let gen = GeminiGenerator::new(&cfg(server.url()), 1_000).unwrap();
        assert_eq!(gen.generate("PROMPT").await.unwrap(), "A deer.");
    }

    #[tokio::test]
    async fn test_generate_blocked_prompt_fails() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let gen = GeminiGenerator::new(&cfg(server.url()), 1_000).unwrap();
        let err = gen.generate("PROMPT").await.unwrap_err();
        assert!(err.to_string().contains("no text"));
    }
}
