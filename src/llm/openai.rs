//! OpenAI-compatible vision chat-completions client.
//!
//! Works against api.openai.com and any gateway exposing the same shape
//! (Azure OpenAI deployments included — point OPENAI_ENDPOINT at the
//! deployment's chat-completions base).

use crate::config::Config;
use crate::error::{UpstreamError, UpstreamKind};
use crate::llm::provider::{VisionCompletionRequest, VisionModelClient};
use async_trait::async_trait;

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, cfg: &Config) -> Self {
        Self {
            http: build_http_client(cfg),
            endpoint: cfg.openai_endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: cfg.openai_model.clone(),
        }
    }
}

#[async_trait]
impl VisionModelClient for OpenAiClient {
    async fn complete(&self, request: &VisionCompletionRequest) -> Result<String, UpstreamError> {
        log::info!("[LLM] Model: {}", self.model);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
                "n": 1,
                "messages": [
                    {
                        "role": "system",
                        "content": request.system_prompt,
                    },
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "text",
                                "text": request.user_prompt,
                            },
                            {
                                "type": "image_url",
                                "image_url": { "url": request.image_data_url },
                            }
                        ],
                    }
                ]
            }))
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] OpenAI API returned {}: {}", status, body);
            return Err(UpstreamError::new(UpstreamKind::Api(status.as_u16()), body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::new(UpstreamKind::Malformed, e.to_string()))?;

        // Single choice requested; missing content is an empty completion,
        // not an error.
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        if let Some(usage) = body.get("usage") {
            log::info!(
                "[LLM] Tokens: prompt={} completion={}",
                usage["prompt_tokens"].as_u64().unwrap_or(0),
                usage["completion_tokens"].as_u64().unwrap_or(0),
            );
        }

        Ok(text)
    }
}

/// Build a reqwest client with the configured request timeout.
pub(crate) fn build_http_client(cfg: &Config) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(cfg.request_timeout)
        .build()
        .expect("failed to build reqwest client")
}
