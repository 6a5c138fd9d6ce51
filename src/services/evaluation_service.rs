//! Answer evaluation backed by a language model.
//!
//! Every call is bounded by a timeout and every failure (timeout, backend
//! error, unparseable output) is absorbed into
//! [`EvaluationResult::fallback`], so an unreliable backend can slow an
//! interview down but never block it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{complete_within, extract_json_from_response};
use crate::domain::models::EvaluationResult;
use crate::domain::ports::{ExecutionParameters, LlmSubstrate, SubstrateRequest};
use crate::domain::EvaluationError;

/// Grades a single answer against its question
pub struct EvaluationService {
    substrate: Arc<dyn LlmSubstrate>,
    timeout: Duration,
    parameters: ExecutionParameters,
}

impl EvaluationService {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

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

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Grading prompt for one question/answer pair
    pub fn build_prompt(question_text: &str, candidate_answer: &str) -> String {
        format!(
            r#"You are an expert Excel interviewer and evaluator.
Evaluate the candidate's answer for the following question.

Question: {question_text}
Candidate Answer: {candidate_answer}

Instructions:
- Evaluate the answer as correct, partially correct, or incorrect.
- Ignore minor spelling/formatting mistakes.
- Respond ONLY in JSON format:
  {{"score": <0-4>, "remarks": "Short constructive comment"}}
- 4 = fully correct, 2-3 = partially correct, 0 = incorrect.
- Do NOT hallucinate information.
"#
        )
    }

    /// Evaluate an answer. Never fails; falls back to a zero score.
    #[instrument(skip_all, fields(substrate = self.substrate.substrate_id()))]
    pub async fn evaluate(&self, question_text: &str, candidate_answer: &str) -> EvaluationResult {
        match self.try_evaluate(question_text, candidate_answer).await {
            Ok(result) => {
                debug!(score = result.score, "answer evaluated");
                result
            }
            Err(err) => {
                warn!(error = %err, "evaluation failed, using fallback result");
                EvaluationResult::fallback()
            }
        }
    }

    /// Evaluate an answer, reporting why it failed if it did
    pub async fn try_evaluate(
        &self,
        question_text: &str,
        candidate_answer: &str,
    ) -> Result<EvaluationResult, EvaluationError> {
        let request = SubstrateRequest::new(Self::build_prompt(question_text, candidate_answer))
            .with_parameters(self.parameters.clone());

        let raw = complete_within(self.substrate.as_ref(), request, self.timeout).await?;
        parse_evaluation(&raw)
    }
}

/// Parse and normalize the evaluator's JSON output
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, EvaluationError> {
    let value: Value = serde_json::from_str(extract_json_from_response(raw))?;
    let object = value
        .as_object()
        .ok_or_else(|| EvaluationError::Parse("expected a JSON object".to_string()))?;

    let score = object
        .get("score")
        .ok_or(EvaluationError::MissingField("score"))
        .and_then(parse_score)?;

    let remarks = match object.get("remarks") {
        Some(Value::String(remarks)) if !remarks.trim().is_empty() => remarks.trim().to_string(),
        Some(Value::String(_)) => return Err(EvaluationError::MissingField("remarks")),
        Some(other) => {
            return Err(EvaluationError::Parse(format!(
                "remarks must be a string, got {other}"
            )))
        }
        None => return Err(EvaluationError::MissingField("remarks")),
    };

    Ok(EvaluationResult::new(score, remarks))
}

/// Accept integers, fractional numbers (truncated) and numeric strings
fn parse_score(value: &Value) -> Result<i64, EvaluationError> {
    #[allow(clippy::cast_possible_truncation)]
    let truncate = |f: f64| f.trunc() as i64;

    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .ok_or_else(|| EvaluationError::Parse(format!("unusable score {n}"))),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(truncate))
                .ok_or_else(|| EvaluationError::Parse(format!("non-numeric score {s:?}")))
        }
        other => Err(EvaluationError::Parse(format!("non-numeric score {other}"))),
    }
}
