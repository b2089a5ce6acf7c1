//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::completion::{CompletionProvider, CompletionRequest};
use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::types::Message;

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiClient {
    /// Create a client from configuration
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Pull a readable message out of an error body, falling back to the raw text
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope.error.message,
            Err(_) if body.trim().is_empty() => format!("Completion request failed ({})", status),
            Err(_) => format!("Completion request failed ({}): {}", status, body.trim()),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: request.messages(),
        };

        let mut http = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http
            .send()
            .await
            .map_err(|e| Error::upstream(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::upstream(Self::error_message(status, &text)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("Failed to parse completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::upstream("No reply in completion response"))
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
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

    /// Serve `app` on an ephemeral port and return its base URL
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> OpenAiClient {
        let config = LlmConfig {
            base_url,
            api_key: Some("sk-test".to_string()),
            ..LlmConfig::default()
        };
        OpenAiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = client_for("https://api.example.com/v1/".to_string());
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_sends_model_turns_and_key() {
        let app = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let reply = format!(
                    "{}|{}|{}|{}",
                    auth,
                    body["model"].as_str().unwrap_or_default(),
                    body["messages"][0]["role"].as_str().unwrap_or_default(),
                    body["messages"][1]["content"].as_str().unwrap_or_default(),
                );
                Json(json!({ "choices": [{ "message": { "role": "assistant", "content": reply } }] }))
            }),
        );
        let client = client_for(spawn(app).await);

        let reply = client
            .complete(&CompletionRequest::new("Be brief.", "\nhello"))
            .await
            .unwrap();

        assert_eq!(reply, "Bearer sk-test|gpt-5-mini|system|\nhello");
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_surfaced() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" } })),
                )
            }),
        );
        let client = client_for(spawn(app).await);

        let err = client
            .complete(&CompletionRequest::new("sys", "hi"))
            .await
            .unwrap_err();

        match err {
            Error::UpstreamCompletionFailure(msg) => assert_eq!(msg, "Incorrect API key provided"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_failure() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn(app).await);

        let err = client
            .complete(&CompletionRequest::new("sys", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamCompletionFailure(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_failure() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client
            .complete(&CompletionRequest::new("sys", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamCompletionFailure(_)));
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        let msg = OpenAiClient::error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(msg, "Completion request failed (502 Bad Gateway): upstream down");
    }
}
