//! Model-provider trait and provider resolution.
//!
//! The pipeline is written against `VisionModelClient` and never names a
//! concrete provider — any chat-completion API that accepts a system
//! message, a text+image user message, a token cap, and a temperature can
//! be substituted, including test fakes.

use crate::config::Config;
use crate::error::UpstreamError;
use crate::llm::{AnthropicClient, OpenAiClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One vision chat-completion call: system + user text + one embedded
/// image, single choice requested.
#[derive(Debug, Clone)]
pub struct VisionCompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Screenshot as a `data:` URL. Held in memory only for the duration
    /// of the call and never logged.
    pub image_data_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A vision-capable chat-completion provider.
///
/// `complete` returns the single completion's text content — an empty
/// string when the provider omits content, which is not an error.
#[async_trait]
pub trait VisionModelClient: Send + Sync {
    async fn complete(&self, request: &VisionCompletionRequest) -> Result<String, UpstreamError>;
}

// ── Provider metadata + resolution ─────────────────────────────────

/// Provider metadata exposed to operators and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    pub env_key: String,
}

/// All known providers and their display info.
pub fn all_providers() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            id: "openai".to_string(),
            name: "OpenAI GPT-4o — vision chat completions".to_string(),
            env_key: "OPENAI_API_KEY".to_string(),
        },
        ProviderInfo {
            id: "anthropic".to_string(),
            name: "Anthropic Claude Haiku — vision messages".to_string(),
            env_key: "ANTHROPIC_API_KEY".to_string(),
        },
    ]
}

/// Check if a provider has an API key configured.
pub fn is_provider_configured(provider_id: &str) -> bool {
    let env_key = match provider_id {
        "openai" => "OPENAI_API_KEY",
        "anthropic" => "ANTHROPIC_API_KEY",
        _ => return false,
    };
    std::env::var(env_key)
        .map(|k| !k.is_empty())
        .unwrap_or(false)
}

/// Determine which provider to use.
///
/// Priority:
/// 1. LLM_PROVIDER env var (explicit override: "openai" or "anthropic")
/// 2. First provider with an API key set
/// 3. "openai" as final default
pub fn resolve_provider() -> String {
    if let Ok(p) = std::env::var("LLM_PROVIDER") {
        let p = p.to_lowercase();
        if matches!(p.as_str(), "openai" | "anthropic") {
            log::info!("[LLM] Provider override: {}", p);
            return p;
        }
    }

    if is_provider_configured("openai") {
        return "openai".to_string();
    }
    if is_provider_configured("anthropic") {
        return "anthropic".to_string();
    }

    "openai".to_string()
}

/// Build the resolved provider's client from the environment.
///
/// Fails with a human-readable message when the resolved provider has no
/// API key — the server refuses to start rather than serving nothing.
pub fn client_from_env(cfg: &Config) -> Result<Arc<dyn VisionModelClient>, String> {
    let provider = resolve_provider();
    log::info!("[LLM] Provider: {}", provider);
    match provider.as_str() {
        "anthropic" => {
            let api_key = require_key("ANTHROPIC_API_KEY")?;
            Ok(Arc::new(AnthropicClient::new(api_key, cfg)))
        }
        _ => {
            let api_key = require_key("OPENAI_API_KEY")?;
            Ok(Arc::new(OpenAiClient::new(api_key, cfg)))
        }
    }
}

fn require_key(env_key: &str) -> Result<String, String> {
    match std::env::var(env_key) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(format!("{env_key} is not set")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_is_never_configured() {
        assert!(!is_provider_configured("myspace"));
    }

    #[test]
    fn provider_list_covers_both_backends() {
        let ids: Vec<String> = all_providers().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["openai", "anthropic"]);
    }
}
