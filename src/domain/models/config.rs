use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for the interviewer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Interview rules
    #[serde(default)]
    pub interview: InterviewConfig,

    /// Question bank source
    #[serde(default)]
    pub question_bank: QuestionBankConfig,

    /// Evaluation timeouts
    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    /// Language-model backend
    #[serde(default)]
    pub substrate: SubstrateConfig,

    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Interview rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InterviewConfig {
    /// Questions per interview
    #[serde(default = "default_question_count")]
    pub question_count: usize,

    /// Wall-clock budget for one interview, in seconds
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    /// Start with a placeholder set when the bank cannot supply a sample
    #[serde(default = "default_true")]
    pub placeholder_on_bank_failure: bool,

    /// Size of the placeholder set
    #[serde(default = "default_placeholder_count")]
    pub placeholder_count: usize,

    /// Show motivational tips and inline notes
    #[serde(default = "default_true")]
    pub commentary: bool,

    /// How long a finished or overdue session stays readable, in seconds
    #[serde(default = "default_session_retention_secs")]
    pub session_retention_secs: u64,
}

const fn default_question_count() -> usize {
    25
}

const fn default_duration_secs() -> u64 {
    30 * 60
}

const fn default_placeholder_count() -> usize {
    5
}

const fn default_session_retention_secs() -> u64 {
    60 * 60
}

const fn default_true() -> bool {
    true
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            duration_secs: default_duration_secs(),
            placeholder_on_bank_failure: true,
            placeholder_count: default_placeholder_count(),
            commentary: true,
            session_retention_secs: default_session_retention_secs(),
        }
    }
}

/// Question bank source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QuestionBankConfig {
    /// Path to the JSON or YAML bank file
    #[serde(default = "default_bank_path")]
    pub path: PathBuf,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("db/questions.json")
}

impl Default for QuestionBankConfig {
    fn default() -> Self {
        Self {
            path: default_bank_path(),
        }
    }
}

/// Evaluation timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluatorConfig {
    /// Bound on a single answer evaluation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bound on the end-of-interview summary
    #[serde(default = "default_summary_timeout_secs")]
    pub summary_timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_summary_timeout_secs() -> u64 {
    15
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            summary_timeout_secs: default_summary_timeout_secs(),
        }
    }
}

/// Supported language-model backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstrateProvider {
    Ollama,
    Anthropic,
}

/// Language-model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubstrateConfig {
    #[serde(default = "default_provider")]
    pub provider: SubstrateProvider,

    #[serde(default = "default_model")]
    pub model: String,

    /// Override of the provider's default endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key (Anthropic only; falls back to `ANTHROPIC_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Outbound request rate limit
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

const fn default_provider() -> SubstrateProvider {
    SubstrateProvider::Ollama
}

fn default_model() -> String {
    "phi3:mini".to_string()
}

const fn default_temperature() -> f32 {
    0.2
}

const fn default_max_tokens() -> u32 {
    512
}

const fn default_requests_per_second() -> u32 {
    5
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Also log to stderr when writing files
    #[serde(default = "default_true")]
    pub enable_stderr: bool,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stderr: true,
            rotation: RotationPolicy::default(),
        }
    }
}
