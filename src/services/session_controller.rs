/// Interview session controller.
///
/// Drives the `not_started -> in_progress -> completed` state machine over an
/// explicit [`SessionState`] owned by the caller. The controller itself holds
/// only shared, read-only collaborators, so one controller serves any number
/// of concurrent sessions.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{EvaluationService, QuestionBank, SummaryService};
use crate::domain::errors::{DomainResult, InterviewError};
use crate::domain::models::{
    AnswerRecord, InterviewConfig, PublicQuestion, QuestionSet, Registration, SessionPhase,
    SessionReport, SessionState, SummaryEntry,
};
use crate::domain::ports::{Clock, SystemClock};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub record: AnswerRecord,
    pub phase: SessionPhase,
    pub cursor: usize,
}

pub struct SessionController {
    bank: Arc<QuestionBank>,
    evaluator: Arc<EvaluationService>,
    summarizer: Arc<SummaryService>,
    clock: Arc<dyn Clock>,
    settings: InterviewConfig,
}

impl SessionController {
    pub fn new(
        bank: Arc<QuestionBank>,
        evaluator: Arc<EvaluationService>,
        summarizer: Arc<SummaryService>,
        settings: InterviewConfig,
    ) -> Self {
        Self {
            bank,
            evaluator,
            summarizer,
            clock: Arc::new(SystemClock),
            settings,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub const fn settings(&self) -> &InterviewConfig {
        &self.settings
    }

    /// Register the candidate and open the timing window.
    ///
    /// A refused registration leaves the session `not_started`.
    #[instrument(skip(self, state, registration), fields(session_id = %state.id()), err)]
    pub fn start(&self, state: &mut SessionState, registration: &Registration) -> DomainResult<()> {
        if state.phase() != SessionPhase::NotStarted {
            return Err(InterviewError::SessionStateViolation {
                operation: "start the interview",
                phase: state.phase(),
            });
        }
        registration.validate()?;

        let question_set = self.question_set()?;
        let duration = std::time::Duration::from_secs(self.settings.duration_secs);
        let duration = chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);

        state.begin(registration, question_set, self.clock.now(), duration)?;

        info!(
            candidate = state.candidate_name(),
            questions = state.total_questions(),
            deadline = ?state.deadline(),
            "interview started"
        );
        Ok(())
    }

    fn question_set(&self) -> DomainResult<QuestionSet> {
        match self.bank.sample(self.settings.question_count) {
            Ok(set) => Ok(set),
            Err(err) if self.settings.placeholder_on_bank_failure => {
                warn!(
                    error = %err,
                    placeholder_count = self.settings.placeholder_count,
                    "question bank could not supply a set, using placeholder questions"
                );
                Ok(QuestionSet::placeholder(self.settings.placeholder_count))
            }
            Err(err) => Err(err),
        }
    }

    /// Evaluate and record the answer to the current question.
    ///
    /// Any text is accepted, including an empty string; the evaluator
    /// decides what a blank answer is worth.
    #[instrument(skip(self, state, candidate_text), fields(session_id = %state.id(), cursor = state.cursor()), err)]
    pub async fn submit(&self, state: &mut SessionState, candidate_text: &str) -> DomainResult<SubmitOutcome> {
        self.tick(state);
        state.ensure_accepting()?;

        let question = state.current_question()?.clone();
        let answer = candidate_text.trim();
        if answer.is_empty() {
            info!(question_id = question.id, "blank answer submitted");
        }

        let evaluation = self.evaluator.evaluate(&question.text, answer).await;
        let record = AnswerRecord::new(question.id, question.text, answer, evaluation);

        let now = self.clock.now();
        state.record_answer(record.clone(), now)?;
        state.expire_if_due(now);

        info!(
            question_id = record.question_id,
            score = record.score,
            answered = state.cursor(),
            phase = %state.phase(),
            "answer recorded"
        );

        Ok(SubmitOutcome {
            record,
            phase: state.phase(),
            cursor: state.cursor(),
        })
    }

    /// Apply the deadline. Returns the phase after the check.
    pub fn tick(&self, state: &mut SessionState) -> SessionPhase {
        if state.expire_if_due(self.clock.now()) {
            info!(
                session_id = %state.id(),
                answered = state.cursor(),
                total = state.total_questions(),
                "interview time expired"
            );
        }
        state.phase()
    }

    pub fn current_question<'a>(&self, state: &'a SessionState) -> DomainResult<&'a PublicQuestion> {
        state.current_question()
    }

    /// Time left in the interview window
    pub fn remaining(&self, state: &SessionState) -> chrono::Duration {
        state.remaining(self.clock.now())
    }

    /// Record closing feedback. The deadline is applied first, so an expired
    /// session takes feedback too.
    #[instrument(skip(self, state, text), fields(session_id = %state.id()), err)]
    pub fn record_feedback(&self, state: &mut SessionState, text: &str) -> DomainResult<()> {
        self.tick(state);
        state.record_feedback(text)?;
        info!(chars = text.trim().chars().count(), "candidate feedback recorded");
        Ok(())
    }

    /// Final report for a completed session.
    ///
    /// The summary is generated on the first call and cached on the session.
    #[instrument(skip(self, state), fields(session_id = %state.id()), err)]
    pub async fn report(&self, state: &mut SessionState) -> DomainResult<SessionReport> {
        self.tick(state);
        if state.phase() != SessionPhase::Completed {
            return Err(InterviewError::SessionStateViolation {
                operation: "produce a report",
                phase: state.phase(),
            });
        }

        let summary = if let Some(summary) = state.summary() {
            summary.clone()
        } else {
            let entries: Vec<SummaryEntry> =
                state.answers().iter().map(AnswerRecord::to_summary_entry).collect();
            let summary = self.summarizer.summarize(state.candidate_name(), &entries).await;
            state.attach_summary(summary.clone());
            summary
        };

        state.report(summary)
    }
}
