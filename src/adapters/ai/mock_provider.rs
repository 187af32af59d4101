//! Mock AI provider for testing.
//!
//! Configurable implementation of the [`AiProvider`] port: queued replies,
//! error injection, optional latency, and a call log for verification. The
//! mock deliberately does NOT enforce the requested schema on structured
//! calls — callers are responsible for validation, and tests rely on feeding
//! them non-conforming payloads.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::extract::extract_json_payload;
use crate::domain::schema::ResponseSchema;
use crate::ports::{
    AiProvider, FinishReason, GenerationError, GenerationRequest, GenerationResponse, ProviderInfo,
};

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text (structured calls parse it as JSON).
    Text(String),
    /// Return an error.
    Failure(MockFailure),
}

/// Failure modes the mock can inject.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockFailure> for GenerationError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockFailure::ContentFiltered { reason } => GenerationError::content_filtered(reason),
            MockFailure::Unavailable { message } => GenerationError::unavailable(message),
            MockFailure::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockFailure::Network { message } => GenerationError::network(message),
            MockFailure::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

/// One recorded call, for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: GenerationRequest,
    pub structured: bool,
}

/// Mock implementation of the generation gateway.
#[derive(Debug, Clone)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAiProvider {
    /// Creates a mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1", 128_000),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a text reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(content.into()));
        self
    }

    /// Queues a JSON reply (serialized for the structured path).
    pub fn with_json_reply(self, value: serde_json::Value) -> Self {
        let text = value.to_string();
        self.with_reply(text)
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(failure));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made to the mock so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock reply".to_string()))
    }

    fn record(&self, request: &GenerationRequest, structured: bool) {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            structured,
        });
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.record(&request, false);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Text(content) => Ok(GenerationResponse {
                content,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }

    async fn generate_structured(
        &self,
        request: GenerationRequest,
        _schema: &ResponseSchema,
    ) -> Result<serde_json::Value, GenerationError> {
        self.record(&request, true);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Text(content) => {
                extract_json_payload(&content).map_err(|e| GenerationError::parse(e.to_string()))
            }
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
