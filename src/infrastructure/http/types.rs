//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{
    AnswerRecord, PublicQuestion, SessionPhase, SessionReport, SessionState,
};

/// A fresh sample for a client-driven interview
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    /// Questions without reference answers
    pub questions: Vec<PublicQuestion>,
}

/// Grade one answer against a bank question
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// Bank id of the question
    pub question_id: u32,
    /// Candidate's answer, blank when skipped
    #[serde(default)]
    pub user_answer: String,
}

/// One previously evaluated answer, as sent back for summarizing
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryAnswer {
    /// Bank id of the question
    pub id: u32,
    /// Candidate's answer
    #[serde(default)]
    pub user_answer: String,
    /// Score as reported by the client, clamped on receipt
    #[serde(default)]
    pub score: i64,
}

/// Request a performance summary for a finished client-driven interview
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Candidate name used in the prompt
    pub user_name: String,
    /// Graded answers in question order
    #[serde(default)]
    pub answers: Vec<SummaryAnswer>,
}

/// Liveness and load
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: String,
    /// Questions in the loaded bank
    pub bank_size: usize,
    /// Sessions currently held in memory
    pub active_sessions: usize,
}

/// Snapshot of a session's progress
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    /// Handle for the `/sessions/{id}` routes
    pub session_id: Uuid,
    /// Lifecycle phase after the deadline check
    pub phase: SessionPhase,
    /// Empty before registration
    pub candidate_name: String,
    /// Answers recorded so far
    pub answered: usize,
    /// Size of the question set
    pub total_questions: usize,
    /// Unset until the interview starts
    pub deadline: Option<DateTime<Utc>>,
    /// Zero once the deadline has passed
    pub remaining_secs: i64,
}

impl SessionView {
    /// Snapshot `state` with `remaining` time on the clock
    pub fn new(state: &SessionState, remaining: chrono::Duration) -> Self {
        Self {
            session_id: state.id(),
            phase: state.phase(),
            candidate_name: state.candidate_name().to_string(),
            answered: state.cursor(),
            total_questions: state.total_questions(),
            deadline: state.deadline(),
            remaining_secs: remaining.num_seconds(),
        }
    }
}

/// The question awaiting an answer
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionView {
    /// One-based position in the set
    pub position: usize,
    /// Size of the question set
    pub total_questions: usize,
    /// Seconds left before the deadline
    pub remaining_secs: i64,
    /// Question text and options, without the reference answer
    pub question: PublicQuestion,
}

/// Answer to the current question
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Blank records the question as unattempted
    #[serde(default)]
    pub answer: String,
}

/// Graded answer and the session's progress after it
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Stored answer with its score and remarks
    pub record: AnswerRecord,
    /// `completed` after the last answer
    pub phase: SessionPhase,
    /// Answers recorded so far
    pub answered: usize,
    /// Size of the question set
    pub total_questions: usize,
    /// Motivational tip at milestones, when commentary is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

/// Final results of a completed session
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Scores, answers and summary
    #[serde(flatten)]
    pub report: SessionReport,
    /// Presentation notes, one per answer, empty when commentary is off
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Closing feedback from the candidate
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// Free text, must not be blank
    #[serde(default)]
    pub feedback: String,
}

/// Acknowledgement of recorded feedback
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Thank-you message for the candidate
    pub message: String,
}
