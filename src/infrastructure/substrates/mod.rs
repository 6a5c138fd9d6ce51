//! LLM substrate implementations
//!
//! Concrete `LlmSubstrate` backends plus the factory that picks one from
//! configuration. Every backend shares the same outbound rate limiter type
//! and HTTP status mapping.

pub mod anthropic_api;
pub mod ollama;

pub use anthropic_api::{AnthropicApiConfig, AnthropicApiSubstrate};
pub use ollama::{OllamaConfig, OllamaSubstrate};

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use tracing::info;

use crate::domain::models::config::{SubstrateConfig, SubstrateProvider};
use crate::domain::ports::{LlmSubstrate, SubstrateError};

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the configured backend
pub fn build_substrate(config: &SubstrateConfig) -> Result<Arc<dyn LlmSubstrate>, SubstrateError> {
    let substrate: Arc<dyn LlmSubstrate> = match config.provider {
        SubstrateProvider::Ollama => Arc::new(OllamaSubstrate::new(OllamaConfig {
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| OllamaConfig::DEFAULT_BASE_URL.to_string()),
            requests_per_second: config.requests_per_second,
        })?),
        SubstrateProvider::Anthropic => {
            let api_key = config
                .api_key
                .clone()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    SubstrateError::NotConfigured(
                        "substrate.api_key or ANTHROPIC_API_KEY must be set".to_string(),
                    )
                })?;

            Arc::new(AnthropicApiSubstrate::new(AnthropicApiConfig {
                api_key,
                model: config.model.clone(),
                base_url: config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| AnthropicApiConfig::DEFAULT_BASE_URL.to_string()),
                requests_per_second: config.requests_per_second,
            })?)
        }
    };

    info!(
        substrate = substrate.substrate_id(),
        model = %config.model,
        requests_per_second = config.requests_per_second,
        "language model substrate configured"
    );
    Ok(substrate)
}

pub(crate) fn rate_limiter(requests_per_second: u32) -> Result<DefaultDirectRateLimiter, SubstrateError> {
    let rate = NonZeroU32::new(requests_per_second).ok_or_else(|| {
        SubstrateError::InvalidConfig("requests_per_second must be at least 1".to_string())
    })?;
    Ok(RateLimiter::direct(Quota::per_second(rate)))
}

/// Map a non-success HTTP status to a substrate error
pub(crate) fn status_error(status: StatusCode, body: &str) -> SubstrateError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SubstrateError::AuthError(format!("{status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => SubstrateError::RateLimitExceeded(body.to_string()),
        _ => SubstrateError::ExecutionFailed(format!("{status}: {body}")),
    }
}

pub(crate) fn network_error(err: &reqwest::Error) -> SubstrateError {
    SubstrateError::NetworkError(err.to_string())
}
