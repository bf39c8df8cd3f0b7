//! Error taxonomy for the reply-generation pipeline.
//!
//! Four kinds leave this crate: missing input, invalid parameter, upstream
//! provider failure, and cancellation. Validation errors are produced before
//! any network call; upstream errors preserve the provider's message as a
//! diagnostic detail that must never reach the end user.

use thiserror::Error;

/// What went wrong at the model provider boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// The call exceeded the request timeout.
    Timeout,
    /// Transport failure (DNS, connect, TLS, mid-stream).
    Network,
    /// Provider returned a non-2xx status.
    Api(u16),
    /// Provider returned 2xx but the body did not parse.
    Malformed,
}

impl std::fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamKind::Timeout => f.write_str("timeout"),
            UpstreamKind::Network => f.write_str("network"),
            UpstreamKind::Api(status) => write!(f, "api status {status}"),
            UpstreamKind::Malformed => f.write_str("malformed response"),
        }
    }
}

/// A failed model-provider call, with the provider's error text preserved
/// for diagnostics.
#[derive(Debug, Clone, Error)]
#[error("upstream error ({kind}): {message}")]
pub struct UpstreamError {
    pub kind: UpstreamKind,
    pub message: String,
}

impl UpstreamError {
    pub fn new(kind: UpstreamKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Map a reqwest transport error into the taxonomy. Timeouts are kept
    /// distinct so callers can choose to retry them.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            UpstreamKind::Timeout
        } else {
            UpstreamKind::Network
        };
        Self::new(kind, err.to_string())
    }

    /// Timeouts, transport failures, and provider 5xx may succeed on retry.
    /// Provider 4xx (quota, auth, bad request) will not.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            UpstreamKind::Timeout | UpstreamKind::Network => true,
            UpstreamKind::Api(status) => status >= 500,
            UpstreamKind::Malformed => false,
        }
    }
}

/// Everything `generate()` can fail with.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Missing required field: {field}")]
    MissingInput { field: &'static str },

    #[error("Invalid {field}: {value:?}. Must be: {allowed}")]
    InvalidParameter {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Request cancelled by caller")]
    Cancelled,
}

impl GenerateError {
    pub fn missing(field: &'static str) -> Self {
        GenerateError::MissingInput { field }
    }

    pub fn invalid(field: &'static str, value: impl Into<String>, allowed: impl Into<String>) -> Self {
        GenerateError::InvalidParameter {
            field,
            value: value.into(),
            allowed: allowed.into(),
        }
    }

    /// Whether a caller-side retry decorator should re-attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerateError::Upstream(err) => err.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_network_are_retryable() {
        assert!(UpstreamError::new(UpstreamKind::Timeout, "deadline").is_retryable());
        assert!(UpstreamError::new(UpstreamKind::Network, "reset").is_retryable());
    }

    #[test]
    fn provider_5xx_retryable_4xx_not() {
        assert!(UpstreamError::new(UpstreamKind::Api(503), "overloaded").is_retryable());
        assert!(!UpstreamError::new(UpstreamKind::Api(401), "bad key").is_retryable());
        assert!(!UpstreamError::new(UpstreamKind::Api(429), "quota").is_retryable());
    }

    #[test]
    fn validation_and_cancellation_never_retry() {
        assert!(!GenerateError::missing("image").is_retryable());
        assert!(!GenerateError::invalid("tone", "loud", "professional, friendly").is_retryable());
        assert!(!GenerateError::Cancelled.is_retryable());
    }

    #[test]
    fn validation_messages_name_the_field() {
        let err = GenerateError::missing("image");
        assert_eq!(err.to_string(), "Missing required field: image");

        let err = GenerateError::invalid("platform", "myspace", "whatsapp, imessage");
        let msg = err.to_string();
        assert!(msg.contains("platform"));
        assert!(msg.contains("myspace"));
        assert!(msg.contains("whatsapp"));
    }
}
