use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid question_count: {0}. Must be at least 1")]
    InvalidQuestionCount(usize),

    #[error("Invalid duration_secs: {0}. Must be between 1 and 86400")]
    InvalidDuration(u64),

    #[error("Invalid placeholder_count: {0}. Must be at least 1 when placeholders are enabled")]
    InvalidPlaceholderCount(usize),

    #[error("Invalid session_retention_secs: {0}. Must be between 1 and 604800")]
    InvalidRetention(u64),

    #[error("Invalid {field}: {value}. Timeouts must be positive")]
    InvalidTimeout { field: &'static str, value: u64 },

    #[error("Question bank path cannot be empty")]
    EmptyQuestionBankPath,

    #[error("Substrate model cannot be empty")]
    EmptyModel,

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid requests_per_second: {0}. Must be at least 1")]
    InvalidRateLimit(u32),

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Server port cannot be 0")]
    InvalidPort,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    pub const PROJECT_CONFIG: &'static str = ".interviewer/config.yaml";
    pub const LOCAL_CONFIG: &'static str = ".interviewer/local.yaml";
    pub const ENV_PREFIX: &'static str = "INTERVIEWER_";

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .interviewer/config.yaml
    /// 3. .interviewer/local.yaml (optional overrides)
    /// 4. Environment variables (`INTERVIEWER_*`, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(Self::PROJECT_CONFIG))
                .merge(Yaml::file(Self::LOCAL_CONFIG))
                .merge(Env::prefixed(Self::ENV_PREFIX).split("__")),
        )
        .context("Failed to extract configuration from figment")
    }

    /// Load with an explicit file in place of the project files.
    ///
    /// Environment variables still take precedence over the file.
    pub fn load_with_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(Self::ENV_PREFIX).split("__")),
        )
        .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Load configuration from a specific file, ignoring the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(path)),
        )
        .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment.extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let interview = &config.interview;
        if interview.question_count == 0 {
            return Err(ConfigError::InvalidQuestionCount(interview.question_count));
        }
        if interview.duration_secs == 0 || interview.duration_secs > 86_400 {
            return Err(ConfigError::InvalidDuration(interview.duration_secs));
        }
        if interview.placeholder_on_bank_failure && interview.placeholder_count == 0 {
            return Err(ConfigError::InvalidPlaceholderCount(interview.placeholder_count));
        }
        if interview.session_retention_secs == 0 || interview.session_retention_secs > 604_800 {
            return Err(ConfigError::InvalidRetention(interview.session_retention_secs));
        }

        if config.question_bank.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyQuestionBankPath);
        }

        if config.evaluator.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "evaluator.timeout_secs",
                value: config.evaluator.timeout_secs,
            });
        }
        if config.evaluator.summary_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                field: "evaluator.summary_timeout_secs",
                value: config.evaluator.summary_timeout_secs,
            });
        }

        let substrate = &config.substrate;
        if substrate.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if !(0.0..=2.0).contains(&substrate.temperature) {
            return Err(ConfigError::InvalidTemperature(substrate.temperature));
        }
        if substrate.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(substrate.max_tokens));
        }
        if substrate.requests_per_second == 0 {
            return Err(ConfigError::InvalidRateLimit(substrate.requests_per_second));
        }

        if config.server.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LogFormat, SubstrateProvider};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.interview.question_count, 25);
        assert_eq!(config.interview.duration_secs, 1800);
        assert_eq!(config.evaluator.timeout_secs, 10);
        assert_eq!(config.evaluator.summary_timeout_secs, 15);
        assert_eq!(config.substrate.provider, SubstrateProvider::Ollama);
        assert_eq!(config.substrate.model, "phi3:mini");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
interview:
  question_count: 10
  duration_secs: 600
substrate:
  provider: anthropic
  model: claude-3-5-haiku-latest
  requests_per_second: 2
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.interview.question_count, 10);
        assert_eq!(config.interview.duration_secs, 600);
        assert!(config.interview.placeholder_on_bank_failure);
        assert_eq!(config.substrate.provider, SubstrateProvider::Anthropic);
        assert_eq!(config.substrate.requests_per_second, 2);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.question_bank.path, PathBuf::from("db/questions.json"));

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let yaml = "substrate:\n  provider: openai\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_validate_zero_questions() {
        let mut config = Config::default();
        config.interview.question_count = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidQuestionCount(0))
        ));
    }

    #[test]
    fn test_validate_duration_bounds() {
        let mut config = Config::default();
        config.interview.duration_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidDuration(0))
        ));

        config.interview.duration_secs = 86_401;
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_session_retention() {
        let mut config = Config::default();
        assert_eq!(config.interview.session_retention_secs, 3600);

        config.interview.session_retention_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRetention(0))
        ));

        config.interview.session_retention_secs = 604_801;
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.evaluator.summary_timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout {
                field: "evaluator.summary_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_placeholder_count() {
        let mut config = Config::default();
        config.interview.placeholder_count = 0;
        assert!(ConfigLoader::validate(&config).is_err());

        config.interview.placeholder_on_bank_failure = false;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_substrate() {
        let mut config = Config::default();
        config.substrate.temperature = 3.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTemperature(_))
        ));

        let mut config = Config::default();
        config.substrate.requests_per_second = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(0))
        ));

        let mut config = Config::default();
        config.substrate.model = "  ".to_string();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyModel)));
    }

    #[test]
    fn test_validate_server() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidPort)));

        let mut config = Config::default();
        config.server.host = String::new();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyHost)));
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9100\nevaluator:\n  timeout_secs: 3").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.evaluator.timeout_secs, 3);
        assert_eq!(config.evaluator.summary_timeout_secs, 15);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "interview:\n  question_count: 0").unwrap();
        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9100\n  host: 0.0.0.0").unwrap();

        temp_env::with_vars(
            [
                ("INTERVIEWER_SERVER__PORT", Some("9200")),
                ("INTERVIEWER_SUBSTRATE__MODEL", Some("llama3")),
            ],
            || {
                let config = ConfigLoader::load_with_file(file.path()).unwrap();
                assert_eq!(config.server.port, 9200);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.substrate.model, "llama3");
            },
        );
    }

    #[test]
    fn test_load_with_missing_file() {
        assert!(ConfigLoader::load_with_file("/nonexistent/interviewer.yaml").is_err());
    }
}
