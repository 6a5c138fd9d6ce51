/// Domain models for interview sessions.
///
/// A session moves `not_started -> in_progress -> completed` and never back.
/// The cursor is the number of recorded answers, so the answers and the
/// cursor can never drift apart.
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::{AnswerRecord, SummaryResult, MAX_SCORE};
use super::question::{PublicQuestion, QuestionSet};
use crate::domain::errors::{DomainResult, InterviewError};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Candidate has not registered yet
    NotStarted,
    /// Questions are being answered
    InProgress,
    /// Terminal; only reporting reads the session from here on
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Why a session completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    AllAnswered,
    TimeExpired,
}

/// Candidate details collected on the welcome screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub candidate_name: String,
    pub institute: String,
    #[serde(default)]
    pub rules_acknowledged: bool,
}

impl Registration {
    pub fn new(
        candidate_name: impl Into<String>,
        institute: impl Into<String>,
        rules_acknowledged: bool,
    ) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            institute: institute.into(),
            rules_acknowledged,
        }
    }

    /// Check every field needed to start an interview
    pub fn validate(&self) -> DomainResult<()> {
        let mut missing = Vec::new();
        if self.candidate_name.trim().is_empty() {
            missing.push("candidate name is required");
        }
        if self.institute.trim().is_empty() {
            missing.push("institute is required");
        }
        if !self.rules_acknowledged {
            missing.push("interview rules must be acknowledged");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InterviewError::RegistrationIncomplete(missing.join(", ")))
        }
    }
}

/// State of one candidate's interview attempt
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    candidate_name: String,
    institute: String,
    question_set: QuestionSet,
    answers: Vec<AnswerRecord>,
    phase: SessionPhase,
    started_at: Option<DateTime<Utc>>,
    deadline: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    completion_reason: Option<CompletionReason>,
    summary: Option<SummaryResult>,
    feedback: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh session waiting for registration
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate_name: String::new(),
            institute: String::new(),
            question_set: QuestionSet::default(),
            answers: Vec::new(),
            phase: SessionPhase::NotStarted,
            started_at: None,
            deadline: None,
            completed_at: None,
            completion_reason: None,
            summary: None,
            feedback: None,
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn candidate_name(&self) -> &str {
        &self.candidate_name
    }

    pub fn institute(&self) -> &str {
        &self.institute
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub const fn question_set(&self) -> &QuestionSet {
        &self.question_set
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Index of the next question to answer
    pub fn cursor(&self) -> usize {
        self.answers.len()
    }

    pub fn total_questions(&self) -> usize {
        self.question_set.len()
    }

    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub const fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion_reason
    }

    pub const fn summary(&self) -> Option<&SummaryResult> {
        self.summary.as_ref()
    }

    /// Move from `not_started` to `in_progress`
    pub fn begin(
        &mut self,
        registration: &Registration,
        question_set: QuestionSet,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> DomainResult<()> {
        if self.phase != SessionPhase::NotStarted {
            return Err(InterviewError::SessionStateViolation {
                operation: "start the interview",
                phase: self.phase,
            });
        }
        registration.validate()?;

        self.candidate_name = registration.candidate_name.trim().to_string();
        self.institute = registration.institute.trim().to_string();
        self.question_set = question_set;
        self.started_at = Some(now);
        self.deadline = Some(now.checked_add_signed(duration).unwrap_or(DateTime::<Utc>::MAX_UTC));
        self.phase = SessionPhase::InProgress;

        if self.question_set.is_empty() {
            self.complete(CompletionReason::AllAnswered, now);
        }
        Ok(())
    }

    /// The question awaiting an answer
    pub fn current_question(&self) -> DomainResult<&PublicQuestion> {
        match self.phase {
            SessionPhase::NotStarted => Err(InterviewError::SessionStateViolation {
                operation: "read the current question",
                phase: self.phase,
            }),
            SessionPhase::InProgress | SessionPhase::Completed => {
                self.question_set
                    .get(self.cursor())
                    .filter(|_| self.phase == SessionPhase::InProgress)
                    .ok_or(InterviewError::OutOfRange {
                        cursor: self.cursor(),
                        total: self.total_questions(),
                    })
            }
        }
    }

    /// Check that an answer may be recorded right now
    pub fn ensure_accepting(&self) -> DomainResult<()> {
        if self.phase != SessionPhase::InProgress {
            return Err(InterviewError::SessionStateViolation {
                operation: "submit an answer",
                phase: self.phase,
            });
        }
        if self.cursor() >= self.total_questions() {
            return Err(InterviewError::OutOfRange {
                cursor: self.cursor(),
                total: self.total_questions(),
            });
        }
        Ok(())
    }

    /// Append the answer for the current question and advance the cursor
    pub fn record_answer(&mut self, record: AnswerRecord, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_accepting()?;

        self.answers.push(record);
        if self.cursor() == self.total_questions() {
            self.complete(CompletionReason::AllAnswered, now);
        }
        Ok(())
    }

    /// Force completion once the deadline has passed.
    ///
    /// Returns true if this call completed the session.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match (self.phase, self.deadline) {
            (SessionPhase::InProgress, Some(deadline)) if now >= deadline => {
                self.complete(CompletionReason::TimeExpired, now);
                true
            }
            _ => false,
        }
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.deadline
            .map_or_else(Duration::zero, |deadline| (deadline - now).max(Duration::zero()))
    }

    pub fn attach_summary(&mut self, summary: SummaryResult) {
        self.summary = Some(summary);
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Store the candidate's closing feedback, replacing any earlier entry.
    ///
    /// Only a completed session takes feedback.
    pub fn record_feedback(&mut self, text: &str) -> DomainResult<()> {
        if self.phase != SessionPhase::Completed {
            return Err(InterviewError::SessionStateViolation {
                operation: "leave feedback",
                phase: self.phase,
            });
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(InterviewError::EmptyFeedback);
        }
        self.feedback = Some(text.to_string());
        Ok(())
    }

    pub fn total_score(&self) -> u32 {
        self.answers.iter().map(|a| u32::from(a.score)).sum()
    }

    pub fn max_score(&self) -> u32 {
        u32::try_from(self.total_questions())
            .unwrap_or(u32::MAX)
            .saturating_mul(u32::from(MAX_SCORE))
    }

    /// Answers with non-empty submitted text
    pub fn attempted(&self) -> usize {
        self.answers.iter().filter(|a| a.is_attempted()).count()
    }

    /// Build the final report. Requires a completed session.
    pub fn report(&self, summary: SummaryResult) -> DomainResult<SessionReport> {
        if self.phase != SessionPhase::Completed {
            return Err(InterviewError::SessionStateViolation {
                operation: "produce a report",
                phase: self.phase,
            });
        }

        let attempted = self.attempted();
        Ok(SessionReport {
            session_id: self.id,
            candidate_name: self.candidate_name.clone(),
            institute: self.institute.clone(),
            total_questions: self.total_questions(),
            answered: self.answers.len(),
            attempted,
            unattempted: self.total_questions().saturating_sub(attempted),
            total_score: self.total_score(),
            max_score: self.max_score(),
            completion_reason: self.completion_reason,
            completed_at: self.completed_at,
            answers: self.answers.clone(),
            summary,
            feedback: self.feedback.clone(),
        })
    }

    fn complete(&mut self, reason: CompletionReason, now: DateTime<Utc>) {
        self.phase = SessionPhase::Completed;
        self.completion_reason = Some(reason);
        self.completed_at = Some(now);
    }
}

/// Acknowledgement shown once feedback is recorded
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback! It will help us improve.";

/// Final results of a completed interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub candidate_name: String,
    pub institute: String,
    pub total_questions: usize,
    pub answered: usize,
    pub attempted: usize,
    pub unattempted: usize,
    pub total_score: u32,
    pub max_score: u32,
    pub completion_reason: Option<CompletionReason>,
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: Vec<AnswerRecord>,
    pub summary: SummaryResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
