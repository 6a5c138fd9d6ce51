//! Answer, evaluation and summary models.

use serde::{Deserialize, Serialize};

/// Highest score a single answer can earn
pub const MAX_SCORE: u8 = 4;

/// Remark attached to an evaluation that could not be completed
pub const FALLBACK_REMARKS: &str = "Could not evaluate answer. Please try again.";

/// Text used for every field of a summary that could not be generated
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";

/// Clamp a model-reported score into `0..=MAX_SCORE`.
pub fn clamp_score(raw: i64) -> u8 {
    // Clamped into 0..=4 first, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = raw.clamp(0, i64::from(MAX_SCORE)) as u8;
    score
}

/// Normalized output of answer evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub remarks: String,
}

impl EvaluationResult {
    /// Build a result from a raw model score, clamping it into range
    pub fn new(raw_score: i64, remarks: impl Into<String>) -> Self {
        Self {
            score: clamp_score(raw_score),
            remarks: remarks.into(),
        }
    }

    /// Zero-score result substituted whenever evaluation fails
    pub fn fallback() -> Self {
        Self {
            score: 0,
            remarks: FALLBACK_REMARKS.to_string(),
        }
    }
}

/// One answered question, created exactly once when the candidate submits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,

    /// Question text at the time of submission
    pub question_text: String,

    /// Trimmed candidate answer; empty when the question was skipped
    pub submitted_text: String,

    pub score: u8,
    pub remarks: String,
}

impl AnswerRecord {
    pub fn new(
        question_id: u32,
        question_text: impl Into<String>,
        submitted_text: impl Into<String>,
        evaluation: EvaluationResult,
    ) -> Self {
        Self {
            question_id,
            question_text: question_text.into(),
            submitted_text: submitted_text.into(),
            score: evaluation.score,
            remarks: evaluation.remarks,
        }
    }

    /// Whether the candidate actually wrote something
    pub fn is_attempted(&self) -> bool {
        !self.submitted_text.trim().is_empty()
    }

    pub fn to_summary_entry(&self) -> SummaryEntry {
        SummaryEntry {
            question: self.question_text.clone(),
            user_answer: self.submitted_text.clone(),
            score: self.score,
        }
    }
}

/// Per-answer context handed to the summary prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub question: String,
    pub user_answer: String,
    pub score: u8,
}

/// Aggregate strengths/weaknesses/suggestions report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub strengths: String,
    pub weaknesses: String,
    pub suggestions: String,
}

impl SummaryResult {
    /// Neutral report used when the summary call fails
    pub fn unavailable() -> Self {
        Self {
            strengths: SUMMARY_UNAVAILABLE.to_string(),
            weaknesses: SUMMARY_UNAVAILABLE.to_string(),
            suggestions: SUMMARY_UNAVAILABLE.to_string(),
        }
    }
}
