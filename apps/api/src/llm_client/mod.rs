//! LLM Client: the single point of entry for all generation-service calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! The orchestrator talks to `dyn GenerationService`; `OpenAiClient` is the
//! production implementation.
//!
//! One round trip per call. No caller-side retry: rate limits and transient
//! failures are reported to the user, who decides whether to try again.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Upper bound on a single completion round trip.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A complete request to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The generation service seam. Returns the completion text, trimmed.
///
/// Carried in `AppState` as `Option<Arc<dyn GenerationService>>`; `None`
/// means no credential was found and generation is disabled.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice, trimmed. Blank content counts as missing.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .text()
            .map(String::from)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                ChatMessage::system("You are an applicant."),
                ChatMessage::user("Resume:\nRust"),
            ],
            temperature: 0.3,
            max_tokens: 600,
        }
    }

    #[test]
    fn test_request_serializes_lowercase_roles() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 600);
        assert_eq!(value["model"], "gpt-4o");
    }

    #[test]
    fn test_blank_choice_counts_as_missing() {
        let parsed: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert!(parsed.text().is_none());
    }

    #[tokio::test]
    async fn test_complete_sends_request_and_trims_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "temperature": 0.3,
                "max_tokens": 600,
                "messages": [
                    {"role": "system", "content": "You are an applicant."},
                    {"role": "user", "content": "Resume:\nRust"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "\n  Dear (#)\n\nHello.  \n"}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            OpenAiClient::new(format!("{}/v1/chat/completions", server.uri()), "sk-test").unwrap();
        let text = client.complete(&request()).await.unwrap();
        assert_eq!(text, "Dear (#)\n\nHello.");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), "sk-test").unwrap();
        match client.complete(&request()).await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_is_kept_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), "sk-test").unwrap();
        let err = client.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(server.uri(), "sk-test").unwrap();
        assert!(matches!(
            client.complete(&request()).await,
            Err(LlmError::EmptyContent)
        ));
    }
}
