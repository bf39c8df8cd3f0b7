//! Anthropic Messages vision client.
//!
//! Key differences from the OpenAI-compatible shape:
//! - API key in the `x-api-key` header plus an `anthropic-version` header
//! - system prompt is a top-level field, not a message
//! - the image travels as a base64 source block, not a data URL
//! - text comes back as a list of content blocks

use crate::config::Config;
use crate::error::{UpstreamError, UpstreamKind};
use crate::llm::openai::build_http_client;
use crate::llm::provider::{VisionCompletionRequest, VisionModelClient};
use async_trait::async_trait;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, cfg: &Config) -> Self {
        Self {
            http: build_http_client(cfg),
            api_key,
            model: cfg.anthropic_model.clone(),
        }
    }
}

#[async_trait]
impl VisionModelClient for AnthropicClient {
    async fn complete(&self, request: &VisionCompletionRequest) -> Result<String, UpstreamError> {
        log::info!("[LLM] Model: {}", self.model);

        let (media_type, image_data) = split_data_url(&request.image_data_url);

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "max_tokens": request.max_tokens,
                "temperature": request.temperature,
                "system": request.system_prompt,
                "messages": [
                    {
                        "role": "user",
                        "content": [
                            {
                                "type": "image",
                                "source": {
                                    "type": "base64",
                                    "media_type": media_type,
                                    "data": image_data,
                                },
                            },
                            {
                                "type": "text",
                                "text": request.user_prompt,
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
            log::error!("[LLM] Anthropic API returned {}: {}", status, body);
            return Err(UpstreamError::new(UpstreamKind::Api(status.as_u16()), body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::new(UpstreamKind::Malformed, e.to_string()))?;

        Ok(extract_text(&body).unwrap_or_default())
    }
}

/// First text content block of a Messages response, if any.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    let content = body.get("content")?.as_array()?;
    for block in content {
        if block.get("type")?.as_str()? == "text" {
            return block.get("text")?.as_str().map(|s| s.to_string());
        }
    }
    None
}

/// Split a `data:<media>;base64,<payload>` URL into media type + payload.
/// A bare base64 string is treated as JPEG, matching the normalization
/// applied by the pipeline.
fn split_data_url(url: &str) -> (&str, &str) {
    if let Some(rest) = url.strip_prefix("data:") {
        if let Some((meta, data)) = rest.split_once(',') {
            return (meta.trim_end_matches(";base64"), data);
        }
    }
    ("image/jpeg", url)
}
