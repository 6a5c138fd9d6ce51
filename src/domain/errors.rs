//! Domain errors for the interviewer.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use super::models::SessionPhase;
use super::ports::SubstrateError;

/// Errors surfaced to callers of the interview pipeline.
///
/// Evaluation-time failures are deliberately absent: those are
/// [`EvaluationError`]s and never leave the evaluation services.
#[derive(Debug, Error)]
pub enum InterviewError {
    /// The bank holds fewer questions than one interview needs
    #[error("Not enough questions in question bank: requested {requested}, available {available}")]
    InsufficientBankSize {
        /// Questions asked for
        requested: usize,
        /// Questions in the bank
        available: usize,
    },

    /// No bank question carries this id
    #[error("Question ID not found: {0}")]
    QuestionNotFound(u32),

    /// Bank records failed validation on load
    #[error("Invalid question bank: {0}")]
    InvalidQuestionBank(String),

    /// Name, institute or rules acknowledgement missing
    #[error("Registration incomplete: {0}")]
    RegistrationIncomplete(String),

    /// Operation not allowed in the session's current phase
    #[error("Cannot {operation} while session is {phase}")]
    SessionStateViolation {
        /// What the caller tried to do
        operation: &'static str,
        /// Phase the session was in
        phase: SessionPhase,
    },

    /// Cursor points past the end of the question set
    #[error("No question at position {cursor}: question set has {total} questions")]
    OutOfRange {
        /// Answers recorded so far
        cursor: usize,
        /// Size of the question set
        total: usize,
    },

    /// No live session with this id
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    /// Closing feedback was blank
    #[error("Feedback cannot be empty")]
    EmptyFeedback,
}

/// Result alias for the interview pipeline
pub type DomainResult<T> = Result<T, InterviewError>;

/// Failures inside a single evaluation or summary call.
///
/// These are absorbed into fallback results by the services.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The model did not answer within the budget
    #[error("Evaluation timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The backend call itself failed
    #[error("Substrate error: {0}")]
    Substrate(#[from] SubstrateError),

    /// The reply was not the expected JSON object
    #[error("Failed to parse evaluator response: {0}")]
    Parse(String),

    /// A required field was absent or blank
    #[error("Evaluator response missing required field: {0}")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for EvaluationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_violation_message() {
        let err = InterviewError::SessionStateViolation {
            operation: "submit an answer",
            phase: SessionPhase::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Cannot submit an answer while session is completed"
        );
    }

    #[test]
    fn test_timeout_message() {
        let err = EvaluationError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Evaluation timed out after 10s");
    }
}
