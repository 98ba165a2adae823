//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! No other module talks to the generative-language service directly. The
//! HTTP exchange itself sits behind `GenerationTransport` so the request and
//! response handling here can be exercised without a network.
//!
//! One request per call: no retry, no streaming, no timeout.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AssistantError;

pub mod prompts;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Header carrying the credential on every request.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 2048;
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const GENERIC_FAILURE: &str = "Failed to generate response";

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Follows candidates[0].content.parts[0].text; `None` if any level is missing.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn build_request_body(prompt: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
        safety_settings: HARM_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport seam
// ────────────────────────────────────────────────────────────────────────────

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The exchange could not be completed (connection, TLS, body read).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

/// Carries one JSON POST to the generation endpoint.
///
/// Held as `Arc<dyn GenerationTransport>` so tests can substitute a spy.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError>;
}

/// Production transport over `reqwest`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl GenerationTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Where requests go. Defaults to the public Gemini endpoint.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl GeminiSettings {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// The single generation client used by the assistant.
#[derive(Clone)]
pub struct GeminiClient {
    transport: Arc<dyn GenerationTransport>,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, settings: &GeminiSettings) -> Self {
        Self {
            transport,
            endpoint: settings.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `prompt` as the sole content part and returns the generated text
    /// exactly as received.
    pub async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, AssistantError> {
        let body = serde_json::to_value(build_request_body(prompt))
            .map_err(|e| AssistantError::RemoteService(e.to_string()))?;

        debug!("Gemini request: prompt_chars={}", prompt.chars().count());

        let response = self
            .transport
            .post_json(&self.endpoint, api_key, &body)
            .await
            .map_err(|e| {
                warn!("Gemini transport failure: {e}");
                if e.message.is_empty() {
                    AssistantError::RemoteService(GENERIC_FAILURE.to_string())
                } else {
                    AssistantError::RemoteService(e.message)
                }
            })?;

        if !response.is_success() {
            let error = remote_error(&response);
            warn!("Gemini returned {}: {}", response.status, error);
            return Err(error);
        }

        let text = extract_text(&response.body)?;
        debug!("Gemini call succeeded: response_chars={}", text.chars().count());
        Ok(text)
    }
}

/// Prefers the service's own message; otherwise synthesizes one from the
/// status code and the service's status token.
fn remote_error(response: &TransportResponse) -> AssistantError {
    let envelope: ErrorEnvelope = serde_json::from_str(&response.body).unwrap_or_default();

    if let Some(message) = envelope.error.message.filter(|m| !m.is_empty()) {
        return AssistantError::RemoteService(message);
    }

    let message = match envelope.error.status.filter(|s| !s.is_empty()) {
        Some(status) => format!(
            "API request failed with status {} ({status})",
            response.status
        ),
        None => format!("API request failed with status {}", response.status),
    };
    AssistantError::RemoteService(message)
}

fn extract_text(body: &str) -> Result<String, AssistantError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        AssistantError::MalformedResponse(format!("Invalid response from Gemini API: {e}"))
    })?;

    parsed.text().map(str::to_string).ok_or_else(|| {
        AssistantError::MalformedResponse("Invalid response format from Gemini API".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request_body("hello")).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);

        let safety = body["safetySettings"].as_array().unwrap();
        assert_eq!(safety.len(), 4);
        let categories: Vec<&str> = safety
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories, HARM_CATEGORIES);
        assert!(safety
            .iter()
            .all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE"));
    }

    #[test]
    fn test_endpoint_includes_model_and_tolerates_trailing_slash() {
        let settings = GeminiSettings {
            base_url: "http://localhost:9000/v1beta/".to_string(),
            model: "gemini-test".to_string(),
        };
        assert_eq!(
            settings.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_extract_text_returns_first_part_unmodified() {
        let body = json!({
            "candidates": [
                {
                    "content": {
                        "parts": [{ "text": "  keep my spacing \n" }, { "text": "ignored" }]
                    }
                }
            ]
        })
        .to_string();
        assert_eq!(extract_text(&body).unwrap(), "  keep my spacing \n");
    }

    #[test]
    fn test_extract_text_missing_levels_are_malformed() {
        let bodies = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
        ];
        for body in bodies {
            let err = extract_text(&body.to_string()).unwrap_err();
            assert!(
                matches!(err, AssistantError::MalformedResponse(_)),
                "expected malformed for {body}"
            );
        }
        assert!(matches!(
            extract_text("not json"),
            Err(AssistantError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_remote_error_prefers_service_message() {
        let response = TransportResponse {
            status: 429,
            body: json!({
                "error": { "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })
            .to_string(),
        };
        assert_eq!(
            remote_error(&response),
            AssistantError::RemoteService("quota exceeded".to_string())
        );
    }

    #[test]
    fn test_remote_error_falls_back_to_status() {
        let with_token = TransportResponse {
            status: 403,
            body: json!({ "error": { "status": "PERMISSION_DENIED" } }).to_string(),
        };
        assert_eq!(
            remote_error(&with_token),
            AssistantError::RemoteService(
                "API request failed with status 403 (PERMISSION_DENIED)".to_string()
            )
        );

        let unparsable = TransportResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        assert_eq!(
            remote_error(&unparsable),
            AssistantError::RemoteService("API request failed with status 502".to_string())
        );
    }
}
