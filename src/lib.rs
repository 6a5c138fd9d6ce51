//! Interviewer - timed, question-by-question interviews graded by a language model
//!
//! A candidate registers, answers a fixed-size random sample of questions one
//! at a time against a wall-clock deadline, and receives per-answer scores
//! plus an aggregate strengths/weaknesses summary.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): session state machine, models, errors and ports
//! - **Service Layer** (`services`): question bank, evaluation, summary, session control
//! - **Application Layer** (`application`): wiring of the pipeline from configuration
//! - **Infrastructure Layer** (`infrastructure`): config, logging, substrates, HTTP
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use interviewer::{Config, Interviewer, Registration, SessionState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let interviewer = Interviewer::from_config(&Config::default())?;
//!     let mut state = SessionState::new();
//!     interviewer
//!         .controller
//!         .start(&mut state, &Registration::new("Asha", "IIT Madras", true))?;
//!     let outcome = interviewer.controller.submit(&mut state, "It adds numbers").await?;
//!     println!("{}: {}", outcome.record.score, outcome.record.remarks);
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::Interviewer;
pub use domain::models::{
    AnswerRecord, CompletionReason, Config, EvaluationResult, PublicQuestion, Question,
    QuestionSet, Registration, SessionPhase, SessionReport, SessionState, SummaryResult,
};
pub use domain::ports::{Clock, Commentary, LlmSubstrate, ManualClock, SystemClock};
pub use domain::{DomainResult, EvaluationError, InterviewError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    EvaluationService, QuestionBank, SessionController, SessionStore, SubmitOutcome, SummaryService,
};
