//! Anthropic API substrate
//!
//! Calls the Messages API directly over HTTP. Requires an API key from
//! configuration or `ANTHROPIC_API_KEY`.

use async_trait::async_trait;
use governor::DefaultDirectRateLimiter;
use reqwest::{header, Client as ReqwestClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{network_error, rate_limiter, status_error, CONNECT_TIMEOUT};
use crate::domain::ports::{
    HealthStatus, LlmSubstrate, SubstrateError, SubstrateRequest, SubstrateResponse, TokenUsage,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic API substrate
#[derive(Debug, Clone)]
pub struct AnthropicApiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL for the API (for testing/proxies)
    pub base_url: String,
    pub requests_per_second: u32,
}

impl AnthropicApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

pub struct AnthropicApiSubstrate {
    http_client: ReqwestClient,
    config: AnthropicApiConfig,
    rate_limiter: DefaultDirectRateLimiter,
}

impl AnthropicApiSubstrate {
    /// Messages API requires an explicit token limit
    const DEFAULT_MAX_TOKENS: u32 = 512;

    pub fn new(config: AnthropicApiConfig) -> Result<Self, SubstrateError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| SubstrateError::InvalidConfig(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .tcp_nodelay(true)
            .default_headers(headers)
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
impl LlmSubstrate for AnthropicApiSubstrate {
    fn substrate_id(&self) -> &'static str {
        "anthropic-api"
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn execute(&self, request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
        self.rate_limiter.until_ready().await;

        let body = MessageRequest {
            model: &self.config.model,
            max_tokens: request
                .parameters
                .max_tokens
                .unwrap_or(Self::DEFAULT_MAX_TOKENS),
            temperature: request.parameters.temperature,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .http_client
            .post(self.url("/v1/messages"))
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        debug!(%status, "anthropic api responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| SubstrateError::InvalidResponse(e.to_string()))?;

        let content = message
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<String>();
        if content.is_empty() {
            return Err(SubstrateError::InvalidResponse(
                "response contained no text".to_string(),
            ));
        }

        Ok(SubstrateResponse {
            content,
            model: message.model,
            usage: Some(TokenUsage {
                input_tokens: message.usage.input_tokens,
                output_tokens: message.usage.output_tokens,
            }),
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
        let response = self
            .http_client
            .get(self.url("/v1/models"))
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(HealthStatus::Healthy)
        } else if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Ok(HealthStatus::Degraded)
        } else {
            Err(status_error(status, &response.text().await.unwrap_or_default()))
        }
    }
}
