//! Runtime configuration — environment variables with service defaults.
//!
//! Loaded once at startup. Parser tunables and generation limits live here
//! so they can be adjusted per deployment without code changes.

use crate::parse::ParserConfig;
use std::time::Duration;

/// Default request timeout for provider calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on generated tokens — sized to comfortably hold 5 short replies.
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Default sampling temperature — varied but coherent replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default cap on the decoded screenshot payload (5 MB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,
    pub port: u16,

    /// OpenAI-compatible chat-completions base URL (`OPENAI_ENDPOINT`).
    pub openai_endpoint: String,
    /// Model / deployment name for the OpenAI provider.
    pub openai_model: String,
    /// Model name for the Anthropic provider.
    pub anthropic_model: String,

    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout: Duration,
    pub max_image_bytes: usize,

    pub parser: ParserConfig,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            host: env_or_str("HOST", "127.0.0.1"),
            port: env_or("PORT", 7071),
            openai_endpoint: env_or_str("OPENAI_ENDPOINT", "https://api.openai.com/v1"),
            openai_model: env_or_str("OPENAI_MODEL", "gpt-4o"),
            anthropic_model: env_or_str("ANTHROPIC_MODEL", "claude-haiku-4-5-20251001"),
            max_tokens: env_or("REPLY_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            temperature: env_or("REPLY_TEMPERATURE", DEFAULT_TEMPERATURE),
            request_timeout: Duration::from_secs(env_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            max_image_bytes: env_or("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES),
            parser: parser_from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // What from_env() yields in an empty environment.
        Self {
            host: "127.0.0.1".to_string(),
            port: 7071,
            openai_endpoint: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o".to_string(),
            anthropic_model: "claude-haiku-4-5-20251001".to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            parser: ParserConfig::default(),
        }
    }
}

/// Parser tunables from the environment, defaults from `ParserConfig`.
fn parser_from_env() -> ParserConfig {
    let defaults = ParserConfig::default();
    ParserConfig {
        bullet_markers: std::env::var("SUGGESTION_BULLET_MARKERS")
            .map(|s| s.chars().collect())
            .unwrap_or(defaults.bullet_markers),
        fallback_min_len: env_or("SUGGESTION_FALLBACK_MIN", defaults.fallback_min_len),
        fallback_max_len: env_or("SUGGESTION_FALLBACK_MAX", defaults.fallback_max_len),
        max_suggestions: env_or("SUGGESTION_MAX", defaults.max_suggestions),
    }
}

/// Load `.env.local` then `.env` from the crate root, first match wins.
/// Missing files are fine — deployed environments set real variables.
pub fn load_dotenv() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    for env_file in [".env.local", ".env"] {
        let path = manifest_dir.join(env_file);
        if path.exists() {
            // Runs before the logger is initialized, so plain stderr.
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_or_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
