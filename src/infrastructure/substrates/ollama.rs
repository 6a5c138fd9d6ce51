//! Ollama substrate
//!
//! Talks to a local Ollama daemon over its chat API. Requests are
//! non-streaming and ask for JSON-formatted output when the caller wants it.

use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{network_error, rate_limiter, status_error, CONNECT_TIMEOUT};
use crate::domain::ports::{
    HealthStatus, LlmSubstrate, SubstrateError, SubstrateRequest, SubstrateResponse, TokenUsage,
};

/// Configuration for the Ollama substrate
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub model: String,
    pub base_url: String,
    pub requests_per_second: u32,
}

impl OllamaConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: "phi3:mini".to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            requests_per_second: 5,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    message: ResponseMessage,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

pub struct OllamaSubstrate {
    http_client: ReqwestClient,
    config: OllamaConfig,
    rate_limiter: DefaultDirectRateLimiter,
}

impl OllamaSubstrate {
    pub fn new(config: OllamaConfig) -> Result<Self, SubstrateError> {
        let http_client = ReqwestClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| SubstrateError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            rate_limiter: rate_limiter(config.requests_per_second)?,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmSubstrate for OllamaSubstrate {
    fn substrate_id(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn execute(&self, request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
        self.rate_limiter.until_ready().await;

        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
            format: request.parameters.json_output.then_some("json"),
            options: ChatOptions {
                temperature: request.parameters.temperature,
                num_predict: request.parameters.max_tokens,
            },
        };

        let response = self
            .http_client
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        debug!(%status, "ollama responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| SubstrateError::InvalidResponse(e.to_string()))?;

        let usage = match (chat.prompt_eval_count, chat.eval_count) {
            (Some(input_tokens), Some(output_tokens)) => Some(TokenUsage {
                input_tokens,
                output_tokens,
            }),
            _ => None,
        };

        Ok(SubstrateResponse {
            content: chat.message.content,
            model: chat.model,
            usage,
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
        let response = self
            .http_client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        if !response.status().is_success() {
            return Ok(HealthStatus::Unavailable);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| SubstrateError::InvalidResponse(e.to_string()))?;

        // Daemon is up but the model has not been pulled
        if tags.models.iter().any(|tag| tag.name == self.config.model) {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded)
        }
    }
}
