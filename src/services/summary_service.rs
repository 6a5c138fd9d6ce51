//! End-of-interview summary.
//!
//! One aggregate model call per interview, under the same bounded-wait and
//! fallback discipline as answer evaluation.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{complete_within, extract_json_from_response};
use crate::domain::models::{SummaryEntry, SummaryResult};
use crate::domain::ports::{ExecutionParameters, LlmSubstrate, SubstrateRequest};
use crate::domain::EvaluationError;

pub struct SummaryService {
    substrate: Arc<dyn LlmSubstrate>,
    timeout: Duration,
    parameters: ExecutionParameters,
}

impl SummaryService {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(substrate: Arc<dyn LlmSubstrate>) -> Self {
        Self {
            substrate,
            timeout: Self::DEFAULT_TIMEOUT,
            parameters: ExecutionParameters::default(),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: ExecutionParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn build_prompt(candidate_name: &str, answers: &[SummaryEntry]) -> String {
        let context = serde_json::to_string(answers).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"You are an expert Excel interviewer. Analyze the candidate's answers.

Candidate: {candidate_name}
Answers with context: {context}

Instructions:
- Provide strengths, weaknesses, and actionable improvement suggestions.
- Output ONLY in JSON format:
  {{"strengths": "...", "weaknesses": "...", "suggestions": "..."}}
- Make it constructive, human-friendly, and concise.
"#
        )
    }

    /// Summarize an interview. Never fails; falls back to a neutral report.
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub async fn summarize(&self, candidate_name: &str, answers: &[SummaryEntry]) -> SummaryResult {
        match self.try_summarize(candidate_name, answers).await {
            Ok(summary) => {
                info!("summary generated");
                summary
            }
            Err(err) => {
                warn!(error = %err, "summary failed, using neutral report");
                SummaryResult::unavailable()
            }
        }
    }

    pub async fn try_summarize(
        &self,
        candidate_name: &str,
        answers: &[SummaryEntry],
    ) -> Result<SummaryResult, EvaluationError> {
        let request = SubstrateRequest::new(Self::build_prompt(candidate_name, answers))
            .with_parameters(self.parameters.clone());

        let raw = complete_within(self.substrate.as_ref(), request, self.timeout).await?;
        parse_summary(&raw)
    }
}

/// Parse the summary JSON. List-valued fields are joined line by line.
pub fn parse_summary(raw: &str) -> Result<SummaryResult, EvaluationError> {
    let value: Value = serde_json::from_str(extract_json_from_response(raw))?;

    Ok(SummaryResult {
        strengths: text_field(&value, "strengths")?,
        weaknesses: text_field(&value, "weaknesses")?,
        suggestions: text_field(&value, "suggestions")?,
    })
}

fn text_field(value: &Value, field: &'static str) -> Result<String, EvaluationError> {
    match value.get(field) {
        Some(Value::String(text)) => Ok(text.trim().to_string()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::trim)
                    .ok_or_else(|| EvaluationError::Parse(format!("{field} must contain strings")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|lines| lines.join("\n")),
        Some(_) => Err(EvaluationError::Parse(format!("{field} must be text"))),
        None => Err(EvaluationError::MissingField(field)),
    }
}
