//! LLM Substrate Port
//!
//! Abstraction over the language-model backend used to grade answers and
//! summarize interviews. To the interview pipeline a substrate is an opaque
//! `prompt -> text` capability; adapters exist for:
//! - Ollama (local models, default `phi3:mini`)
//! - Anthropic API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request to complete a prompt via an LLM substrate
#[derive(Debug, Clone)]
pub struct SubstrateRequest {
    /// Full prompt text, sent as a single user message
    pub prompt: String,

    /// Execution parameters (temperature, token limit, ...)
    pub parameters: ExecutionParameters,
}

impl SubstrateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            parameters: ExecutionParameters::default(),
        }
    }

    #[must_use]
    pub const fn with_parameters(mut self, parameters: ExecutionParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Parameters for controlling LLM execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParameters {
    /// Maximum tokens to generate (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ask the backend to constrain output to JSON where supported
    #[serde(default)]
    pub json_output: bool,
}

impl Default for ExecutionParameters {
    fn default() -> Self {
        Self {
            max_tokens: Some(512),
            temperature: Some(0.2),
            json_output: true,
        }
    }
}

/// Response from an LLM substrate
#[derive(Debug, Clone, PartialEq)]
pub struct SubstrateResponse {
    /// Generated text
    pub content: String,

    /// Model that produced the text
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Health status of a substrate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Substrate is healthy and available
    Healthy,

    /// Substrate is reachable but the configured model is missing
    Degraded,

    /// Substrate is unavailable
    Unavailable,
}

/// Error types for substrate operations
#[derive(Debug, thiserror::Error)]
pub enum SubstrateError {
    #[error("Substrate not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Port trait for LLM substrate implementations
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one substrate is shared by every
/// concurrent interview session.
///
/// Implementations do not enforce the interview timeouts themselves. The
/// evaluation services wrap every call in their own bounded wait.
#[async_trait]
pub trait LlmSubstrate: Send + Sync {
    /// Unique identifier for this substrate type, e.g. "ollama"
    fn substrate_id(&self) -> &'static str;

    /// Complete a prompt
    ///
    /// # Errors
    /// - `SubstrateError::NetworkError` - backend cannot be reached
    /// - `SubstrateError::RateLimitExceeded` - backend refused the request
    /// - `SubstrateError::ExecutionFailed` - backend returned an error status
    /// - `SubstrateError::InvalidResponse` - response body was not understood
    async fn execute(&self, request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError>;

    /// Check that the backend is reachable and configured
    async fn health_check(&self) -> Result<HealthStatus, SubstrateError>;
}
