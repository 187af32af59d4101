//! Generation gateway port - interface to the generative text service.
//!
//! The service is an opaque external capability. The port exposes exactly two
//! regimes: free-text generation for long-form documents, and
//! schema-constrained generation for structured extraction. The gateway
//! performs no retries and no caching; each call is independent and stateless
//! from the gateway's point of view, and failed calls are re-triggered by the
//! user, never automatically.
//!
//! Structured responses are external-boundary values: the gateway only
//! guarantees syntactically valid JSON. Callers validate the shape with
//! [`ResponseSchema::validate`] before trusting it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, UserId};
use crate::domain::project::MessageRole;
use crate::domain::schema::ResponseSchema;

/// Port for generative text service interactions.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Free-text generation (mode A). Used for long-form documents.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Schema-constrained generation (mode B).
    ///
    /// Returns the decoded JSON value. Conformance to `schema` is requested
    /// from the service but NOT guaranteed; the caller validates.
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value, GenerationError>;

    /// Provider information (name, model, capabilities).
    fn provider_info(&self) -> ProviderInfo;
}

/// A message in the prompt conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Project the request belongs to.
    pub project_id: ProjectId,
    /// User on whose behalf the request is made.
    pub user_id: UserId,
    /// Trace ID for correlating logs across one user action.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(project_id: ProjectId, user_id: UserId, trace_id: impl Into<String>) -> Self {
        Self {
            project_id,
            user_id,
            trace_id: trace_id.into(),
        }
    }
}

/// Request for text generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Conversation messages (history + current user message).
    pub messages: Vec<PromptMessage>,
    /// System instruction guiding model behavior.
    pub system_instruction: Option<String>,
    /// Sampling temperature (0.0 = deterministic).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Tracing metadata.
    pub metadata: RequestMetadata,
}

impl GenerationRequest {
    /// Creates a new request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_instruction: None,
            temperature: None,
            max_tokens: None,
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(PromptMessage::new(role, content));
        self
    }

    /// Adds an already-built message.
    pub fn with_prompt_message(mut self, message: PromptMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from free-text generation.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Generated content.
    pub content: String,
    /// Model that produced the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit the max-tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
    /// An error occurred.
    Error,
}

/// Provider information and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "google").
    pub name: String,
    /// Model identifier.
    pub model: String,
    /// Maximum context window size in tokens.
    pub max_context_tokens: u32,
    /// Whether schema-constrained decoding is supported natively.
    pub supports_structured_output: bool,
}

impl ProviderInfo {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        max_context_tokens: u32,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
            supports_structured_output: true,
        }
    }

    pub fn with_structured_output(mut self, supported: bool) -> Self {
        self.supports_structured_output = supported;
        self
    }
}

/// Generation gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Service is unavailable.
    #[error("service unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl GenerationError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
