//! Shared test doubles for the pipeline and server tests.

#![allow(dead_code)]

use async_trait::async_trait;
use reply_copilot::llm::{VisionCompletionRequest, VisionModelClient};
use reply_copilot::pipeline::{GenerationRequest, ReplyGenerationService};
use reply_copilot::{Config, UpstreamError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted provider: returns a fixed completion (or error), counts calls,
/// and records the last request so tests can assert on what reached the
/// provider boundary.
pub struct MockVisionClient {
    response: Result<String, UpstreamError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<VisionCompletionRequest>>,
}

impl MockVisionClient {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            response: Err(err),
            delay: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<VisionCompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModelClient for MockVisionClient {
    async fn complete(&self, request: &VisionCompletionRequest) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

/// Service wired to a mock client with default config.
pub fn service_with(client: Arc<MockVisionClient>) -> ReplyGenerationService {
    ReplyGenerationService::new(client, &Config::default())
}

/// Minimal valid request with a placeholder payload.
pub fn request(image: &str, platform: &str, tone: &str) -> GenerationRequest {
    GenerationRequest {
        image: image.to_string(),
        platform: platform.to_string(),
        tone: tone.to_string(),
        ..GenerationRequest::default()
    }
}
