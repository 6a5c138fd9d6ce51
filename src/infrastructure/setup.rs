//! Project initialization: writes the `.interviewer/` configuration scaffold

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Interviewer Configuration
# Override settings by editing this file, adding .interviewer/local.yaml,
# or setting environment variables with the INTERVIEWER_ prefix.
#
# Example environment variables:
#   export INTERVIEWER_INTERVIEW__DURATION_SECS=900
#   export INTERVIEWER_SUBSTRATE__MODEL=llama3
#   export INTERVIEWER_LOGGING__LEVEL=debug

interview:
  # Questions per interview
  question_count: 25
  # Interview time limit in seconds
  duration_secs: 1800
  # Fall back to placeholder questions when the bank cannot supply a set
  placeholder_on_bank_failure: true
  placeholder_count: 5
  # Motivational tips and inline notes
  commentary: true
  # Seconds a finished or overdue HTTP session is kept before eviction
  session_retention_secs: 3600

question_bank:
  # JSON or YAML: {"questions": [{"id", "question", "answer", "type"?, "options"?}]}
  path: "db/questions.json"

evaluator:
  timeout_secs: 10
  summary_timeout_secs: 15

substrate:
  # ollama | anthropic
  provider: ollama
  model: "phi3:mini"
  # base_url: "http://localhost:11434"
  # api_key: set ANTHROPIC_API_KEY instead of committing a key
  temperature: 0.2
  max_tokens: 512
  requests_per_second: 5

server:
  host: "127.0.0.1"
  port: 8000

logging:
  # trace, debug, info, warn, error
  level: info
  # json | pretty
  format: pretty
  # log_dir: ".interviewer/logs"
  enable_stderr: true
  rotation: daily
"#;

/// Paths used by initialization
#[derive(Debug, Clone)]
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl SetupPaths {
    /// Paths under `root`
    pub fn new(root: &Path) -> Self {
        let config_dir = root.join(".interviewer");
        Self {
            config_file: config_dir.join("config.yaml"),
            logs_dir: config_dir.join("logs"),
            config_dir,
        }
    }

    /// Paths for the current directory
    pub fn current() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::new(&current_dir))
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file.exists()
    }
}

/// Create the configuration and log directories
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir).context("Failed to create config directory")?;
    Ok(())
}

/// Create the default configuration file.
///
/// Returns false when a file already exists and `force` is not set.
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE).context("Failed to write config file")?;
    Ok(true)
}
