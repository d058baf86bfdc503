//! Groq Provider Implementation
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Groq is the
//! default host; any server speaking the same protocol works by changing
//! the endpoint.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Bearer authorization with a caller-supplied credential
//! - JSON-object response mode
//! - Request timeout (the only latency bound on the remote path)
//!
//! Calls are not retried. One failed call fails the upload
//! attempt.
//!
//! # Examples
//!
//! ```no_run
//! use loanchain_llm::{GroqConfig, GroqProvider};
//!
//! let provider = GroqProvider::new(GroqConfig::default()).unwrap();
//! ```

use crate::LlmError;
use loanchain_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default chat-completions base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`GroqProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Chat-completions provider for remote extraction
pub struct GroqProvider {
    config: GroqConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 1],
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl GroqProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `Communication` if the HTTP client cannot be built.
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    /// Send one prompt and return the message content of the first choice
    ///
    /// # Errors
    ///
    /// - `Communication` if the request cannot be sent or times out
    /// - `Http` for any non-2xx status, carrying the status and body text
    /// - `InvalidResponse` if the envelope has no message content
    pub async fn complete(&self, prompt: &str, credential: &str) -> Result<String, LlmError> {
        let url = self.completions_url();

        let request_body = ChatRequest {
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            model: &self.config.model,
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!("POST {} (model {}, prompt {} chars)", url, self.config.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Remote extraction endpoint returned HTTP {}", status.as_u16());
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }
}

impl LlmProviderTrait for GroqProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn generate_json(
        &self,
        prompt: &str,
        credential: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        self.complete(prompt, credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider_for(endpoint: String) -> GroqProvider {
        GroqProvider::new(GroqConfig {
            endpoint,
            timeout_secs: 5,
            ..GroqConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = GroqConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let provider = provider_for("http://localhost:9999/v1/".to_string());
        assert_eq!(provider.completions_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_success_returns_message_content() {
        let app = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer secret-key");
                assert_eq!(body["response_format"]["type"], "json_object");
                assert_eq!(body["messages"][0]["role"], "user");
                Json(json!({
                    "choices": [{ "message": { "content": "{\"isValid\": true}" } }]
                }))
            }),
        );
        let provider = provider_for(spawn_server(app).await);

        let content = provider.complete("analyze this", "secret-key").await.unwrap();
        assert_eq!(content, "{\"isValid\": true}");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let provider = provider_for(spawn_server(app).await);

        let err = provider.complete("prompt", "key").await.unwrap_err();
        assert_eq!(
            err,
            LlmError::Http {
                status: 429,
                body: "rate limited".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_content_is_invalid_response() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let provider = provider_for(spawn_server(app).await);

        let err = provider.complete("prompt", "key").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Bind and drop to get a port nobody is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = provider_for(format!("http://{}", addr));
        let err = provider.complete("prompt", "key").await.unwrap_err();
        assert!(matches!(err, LlmError::Communication(_)));
    }
}
