//! Infrastructure layer module
//!
//! Adapters and external integrations:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Language-model substrates (Ollama, Anthropic API)
//! - Question bank loading
//! - HTTP driver (axum)
//! - Project initialization
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod http;
pub mod logging;
pub mod question_source;
pub mod setup;
pub mod substrates;
