//! Reply-generation pipeline — the single public entry point.
//!
//! validate → normalize image → build prompts → one provider call →
//! parse suggestions → result with timing metadata.
//!
//! The screenshot is held in memory only for the duration of the call and
//! is never logged or persisted here. The one telemetry record per call
//! carries metadata only.

use crate::config::Config;
use crate::error::GenerateError;
use crate::llm::{VisionCompletionRequest, VisionModelClient};
use crate::parse::{parse_suggestions, ParserConfig};
use crate::platform::Platform;
use crate::prompts;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

// ── Types ──────────────────────────────────────────────────────────

/// One inbound generation request, as received on the wire.
///
/// `platform` and `tone` arrive as strings and are resolved against the
/// closed enumerations during validation (case-sensitive).
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Screenshot as base64 or a full data URL. Required.
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn default_platform() -> String {
    Platform::default().as_str().to_string()
}

fn default_tone() -> String {
    Tone::default().as_str().to_string()
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            image: String::new(),
            platform: default_platform(),
            tone: default_tone(),
            user_id: None,
            metadata: None,
        }
    }
}

// Debug never prints the screenshot payload.
impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("image", &format_args!("<{} bytes>", self.image.len()))
            .field("platform", &self.platform)
            .field("tone", &self.tone)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// The outcome of one successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// 0..=5 clean suggestion strings, model order preserved. Empty means
    /// "no suggestions generated" — a valid outcome, not an error.
    pub suggestions: Vec<String>,
    pub processing_time_ms: u64,
    /// RFC 3339 completion timestamp.
    pub timestamp: String,
}

// ── Service ────────────────────────────────────────────────────────

/// Orchestrates one generation per call against an injected provider
/// client. No shared mutable state — concurrent calls are independent.
pub struct ReplyGenerationService {
    client: Arc<dyn VisionModelClient>,
    parser: ParserConfig,
    max_tokens: u32,
    temperature: f32,
    max_image_bytes: usize,
}

impl ReplyGenerationService {
    pub fn new(client: Arc<dyn VisionModelClient>, cfg: &Config) -> Self {
        Self {
            client,
            parser: cfg.parser.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            max_image_bytes: cfg.max_image_bytes,
        }
    }

    /// Generate reply suggestions for one request.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        self.generate_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Like [`generate`](Self::generate), but a fired token aborts the
    /// in-flight provider call and yields `GenerateError::Cancelled` —
    /// distinct from an upstream failure, so callers can tell "model
    /// failed" from "caller gave up".
    pub async fn generate_with_cancel(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<GenerationResult, GenerateError> {
        if cancel.is_cancelled() {
            return Err(GenerateError::Cancelled);
        }

        // Validation precedes the network call.
        let (tone, platform) = self.validate(request)?;
        let image_data_url = normalize_image_payload(&request.image);

        let vision_request = VisionCompletionRequest {
            system_prompt: prompts::build_system_prompt(tone, platform),
            user_prompt: prompts::build_user_prompt().to_string(),
            image_data_url,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let user = request.user_id.as_deref().unwrap_or("anonymous");
        log::debug!(
            "[PIPELINE] Generating: platform={} tone={} user={}",
            platform,
            tone,
            user
        );

        let start = Instant::now();

        let completion = tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("[PIPELINE] Request cancelled by caller");
                return Err(GenerateError::Cancelled);
            }
            result = self.client.complete(&vision_request) => match result {
                Ok(text) => text,
                Err(err) => {
                    log::info!(
                        "[PIPELINE] user={} platform={} tone={} suggestions=0 elapsed_ms={} success=false",
                        user,
                        platform,
                        tone,
                        start.elapsed().as_millis(),
                    );
                    return Err(err.into());
                }
            },
        };

        let suggestions = parse_suggestions(&completion, &self.parser);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        // One telemetry record per call: metadata only, never the image
        // or suggestion text.
        log::info!(
            "[PIPELINE] user={} platform={} tone={} suggestions={} elapsed_ms={} success=true",
            user,
            platform,
            tone,
            suggestions.len(),
            elapsed_ms,
        );

        Ok(GenerationResult {
            suggestions,
            processing_time_ms: elapsed_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Resolve and check the request against the closed enumerations and
    /// payload limits.
    fn validate(&self, request: &GenerationRequest) -> Result<(Tone, Platform), GenerateError> {
        if request.image.trim().is_empty() {
            return Err(GenerateError::missing("image"));
        }

        let tone = Tone::from_canonical(&request.tone)
            .ok_or_else(|| GenerateError::invalid("tone", &request.tone, Tone::ALLOWED))?;
        let platform = Platform::from_canonical(&request.platform).ok_or_else(|| {
            GenerateError::invalid("platform", &request.platform, Platform::ALLOWED)
        })?;

        // Size check uses the encoded length only; the payload itself
        // never appears in an error value.
        let decoded = approx_decoded_len(&request.image);
        if decoded > self.max_image_bytes {
            return Err(GenerateError::invalid(
                "image",
                format!("{decoded} bytes"),
                format!("payloads up to {} bytes", self.max_image_bytes),
            ));
        }

        Ok((tone, platform))
    }
}

// ── Pure helpers ───────────────────────────────────────────────────

/// Ensure the payload is a data URL the providers can embed. Bare base64
/// is assumed to be JPEG, matching what the mobile clients upload.
pub fn normalize_image_payload(image: &str) -> String {
    if image.starts_with("data:") {
        image.to_string()
    } else {
        format!("data:image/jpeg;base64,{image}")
    }
}

/// Decoded size of a base64 payload (data-URL prefix excluded), without
/// decoding it.
fn approx_decoded_len(image: &str) -> usize {
    let b64 = image.split_once(',').map(|(_, d)| d).unwrap_or(image);
    base64::decoded_len_estimate(b64.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_base64_gets_a_jpeg_data_url_prefix() {
        assert_eq!(
            normalize_image_payload("AAAA"),
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn existing_data_url_passes_through() {
        let url = "data:image/png;base64,AAAA";
        assert_eq!(normalize_image_payload(url), url);
    }

    #[test]
    fn decoded_len_skips_the_data_url_prefix() {
        // 8 base64 chars decode to 6 bytes either way.
        assert_eq!(approx_decoded_len("QUFBQUFB"), 6);
        assert_eq!(approx_decoded_len("data:image/png;base64,QUFBQUFB"), 6);
    }

    #[test]
    fn wire_defaults_fill_missing_platform_and_tone() {
        let request: GenerationRequest = serde_json::from_str(r#"{"image": "AAAA"}"#)
            .expect("minimal request must deserialize");
        assert_eq!(request.platform, "whatsapp");
        assert_eq!(request.tone, "friendly");
        assert!(request.user_id.is_none());
    }

    #[test]
    fn debug_output_never_contains_the_payload() {
        let request = GenerationRequest {
            image: "SECRETPAYLOAD".to_string(),
            ..GenerationRequest::default()
        };
        let debugged = format!("{request:?}");
        assert!(!debugged.contains("SECRETPAYLOAD"));
        assert!(debugged.contains("<13 bytes>"));
    }
}
