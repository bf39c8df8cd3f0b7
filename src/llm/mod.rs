//! Model-provider domain — vision chat-completion clients.
//!
//! External code should only use the trait and constructors exported here.
//!
//! Providers:
//!   - OpenAI-compatible chat completions (openai.rs)
//!   - Anthropic Messages (anthropic.rs)
//!
//! Shared:
//!   - provider.rs — client trait, provider metadata, resolution

mod anthropic;
mod openai;
pub mod provider;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use provider::{
    all_providers, client_from_env, is_provider_configured, resolve_provider, ProviderInfo,
    VisionCompletionRequest, VisionModelClient,
};
