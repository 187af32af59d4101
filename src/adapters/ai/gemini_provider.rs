//! Gemini provider - implementation of the generation gateway over the
//! Google Generative Language REST API.
//!
//! Mode A maps to a plain `generateContent` call; mode B sets
//! `responseMimeType: application/json` plus the response schema, which the
//! service decodes against natively. The provider performs no retries: a
//! failed call surfaces immediately and the user re-triggers the action.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::domain::extract::extract_json_payload;
use crate::domain::project::MessageRole;
use crate::domain::schema::ResponseSchema;
use crate::ports::{
    AiProvider, FinishReason, GenerationError, GenerationRequest, GenerationResponse, ProviderInfo,
};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-3-pro-preview", "gemini-3-flash-preview").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout. Mandatory: the service is the single
    /// external-latency dependency on every generation path.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds a provider configuration from the environment-backed
    /// [`AiConfig`], for the given model. Returns `None` when no API key is
    /// configured.
    pub fn from_ai_config(config: &AiConfig, model: impl Into<String>) -> Option<Self> {
        let api_key = config.api_key.as_ref()?.expose_secret().clone();
        Some(
            Self::new(api_key)
                .with_model(model)
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout()),
        )
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Converts our request to the Gemini wire format.
    fn to_gemini_request(
        &self,
        request: &GenerationRequest,
        schema: Option<&ResponseSchema>,
    ) -> GeminiRequest {
        let mut contents = Vec::new();
        for message in &request.messages {
            let role = match message.role {
                // System text travels in systemInstruction, not contents.
                MessageRole::System => continue,
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            contents.push(GeminiContent {
                role: role.to_string(),
                parts: vec![GeminiPart {
                    text: message.content.clone(),
                }],
            });
        }

        let system_instruction = request.system_instruction.as_ref().map(|text| GeminiSystem {
            parts: vec![GeminiPart { text: text.clone() }],
        });

        let generation_config = GeminiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_tokens,
            response_mime_type: schema.map(|_| "application/json".to_string()),
            response_schema: schema.map(|s| {
                serde_json::to_value(s).expect("response schema serializes to JSON")
            }),
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    async fn send(
        &self,
        request: &GenerationRequest,
        schema: Option<&ResponseSchema>,
    ) -> Result<Response, GenerationError> {
        let body = self.to_gemini_request(request, schema);

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    async fn handle_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthenticationFailed),
            429 => Err(GenerationError::rate_limited(60)),
            400 => Err(GenerationError::InvalidRequest(error_body)),
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Flattens the first candidate into text + finish reason.
    async fn parse_response(
        &self,
        response: Response,
    ) -> Result<(String, FinishReason), GenerationError> {
        let response = self.handle_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::parse("response has no candidates"))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("PROHIBITED_CONTENT") => {
                return Err(GenerationError::content_filtered(
                    candidate.finish_reason.unwrap_or_default(),
                ));
            }
            _ => FinishReason::Stop,
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok((text, finish_reason))
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            model = %self.config.model,
            "dispatching free-text generation"
        );

        let response = self.send(&request, None).await?;
        let (content, finish_reason) = self.parse_response(response).await?;

        Ok(GenerationResponse {
            content,
            model: self.config.model.clone(),
            finish_reason,
        })
    }

    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &ResponseSchema,
    ) -> Result<serde_json::Value, GenerationError> {
        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            model = %self.config.model,
            "dispatching schema-constrained generation"
        );

        let response = self.send(&request, Some(schema)).await?;
        let (text, _) = self.parse_response(response).await?;

        // The service occasionally fences the JSON despite the mime type.
        extract_json_payload(&text).map_err(|e| GenerationError::parse(e.to_string()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("google", self.config.model.clone(), 1_000_000)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystem>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiSystem {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ProjectId, UserId};
    use crate::ports::RequestMetadata;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(
            GeminiConfig::new("key-test")
                .with_model("gemini-3-pro-preview")
                .with_base_url("https://example.invalid")
                .with_timeout(Duration::from_secs(5)),
        )
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(RequestMetadata::new(
            ProjectId::new(),
            UserId::new("test-user").unwrap(),
            "trace-1",
        ))
        .with_system_instruction("Be a mentor")
        .with_message(MessageRole::User, "hello")
        .with_message(MessageRole::Assistant, "hi")
        .with_temperature(0.2)
    }

    #[test]
    fn from_ai_config_carries_key_url_and_timeout() {
        let app = AiConfig {
            api_key: Some(secrecy::Secret::new("key-xxx".to_string())),
            base_url: "https://example.invalid".to_string(),
            timeout_secs: 30,
            ..Default::default()
        };

        let config = GeminiConfig::from_ai_config(&app, app.dialog_model.clone()).unwrap();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.base_url, "https://example.invalid");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_ai_config_requires_a_key() {
        assert!(GeminiConfig::from_ai_config(&AiConfig::default(), "any-model").is_none());
    }

    #[test]
    fn url_targets_the_configured_model() {
        assert_eq!(
            provider().generate_url(),
            "https://example.invalid/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn wire_request_maps_roles_and_system_instruction() {
        let provider = provider();
        let wire = provider.to_gemini_request(&request(), None);

        assert_eq!(wire.contents.len(), 2);
        assert_eq!(wire.contents[0].role, "user");
        assert_eq!(wire.contents[1].role, "model");
        assert_eq!(
            wire.system_instruction.as_ref().unwrap().parts[0].text,
            "Be a mentor"
        );
        assert!(wire.generation_config.response_mime_type.is_none());
    }

    #[test]
    fn structured_mode_sets_mime_type_and_schema() {
        let provider = provider();
        let schema =
            ResponseSchema::object().with_required_property("ready", ResponseSchema::boolean());
        let wire = provider.to_gemini_request(&request(), Some(&schema));

        assert_eq!(
            wire.generation_config.response_mime_type.as_deref(),
            Some("application/json")
        );
        let schema_json = wire.generation_config.response_schema.unwrap();
        assert_eq!(schema_json["type"], "OBJECT");
        assert_eq!(schema_json["required"][0], "ready");
    }

    #[test]
    fn wire_request_serializes_camel_case() {
        let provider = provider();
        let schema = ResponseSchema::object();
        let wire = provider.to_gemini_request(&request(), Some(&schema));
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("systemInstruction").is_some());
        assert!(json["generationConfig"].get("responseMimeType").is_some());
        assert_eq!(json["generationConfig"]["temperature"], 0.2f32 as f64);
    }

    #[test]
    fn response_json_deserializes() {
        let raw = r###"{
            "candidates": [{
                "content": {"parts": [{"text": "## Pitch"}, {"text": " body"}]},
                "finishReason": "STOP"
            }]
        }"###;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let candidate = &parsed.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(candidate.content.as_ref().unwrap().parts.len(), 2);
    }
}
