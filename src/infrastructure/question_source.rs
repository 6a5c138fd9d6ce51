//! Question bank file loading.
//!
//! Accepts `{"questions": [...]}` or a bare list of records, as JSON or YAML
//! (chosen by file extension).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::domain::models::QuestionRecord;
use crate::services::QuestionBank;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BankFile {
    Wrapped { questions: Vec<QuestionRecord> },
    Bare(Vec<QuestionRecord>),
}

impl BankFile {
    fn into_records(self) -> Vec<QuestionRecord> {
        match self {
            Self::Wrapped { questions } | Self::Bare(questions) => questions,
        }
    }
}

/// Load and validate a question bank from disk
pub fn load_question_bank(path: impl AsRef<Path>) -> Result<QuestionBank> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question bank {}", path.display()))?;

    let bank = parse_question_bank(&raw, is_yaml(path))
        .with_context(|| format!("Failed to load question bank {}", path.display()))?;

    info!(path = %path.display(), questions = bank.len(), "question bank loaded");
    Ok(bank)
}

/// Parse a bank from text in either supported format
pub fn parse_question_bank(raw: &str, yaml: bool) -> Result<QuestionBank> {
    let file: BankFile = if yaml {
        serde_yaml::from_str(raw).context("Invalid YAML question bank")?
    } else {
        serde_json::from_str(raw).context("Invalid JSON question bank")?
    };

    Ok(QuestionBank::from_records(file.into_records())?)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
