//! Domain models for the interviewer

pub mod answer;
pub mod config;
pub mod question;
pub mod session;

pub use answer::{
    clamp_score, AnswerRecord, EvaluationResult, SummaryEntry, SummaryResult, FALLBACK_REMARKS,
    MAX_SCORE, SUMMARY_UNAVAILABLE,
};
pub use config::{
    Config, EvaluatorConfig, InterviewConfig, LogFormat, LoggingConfig, QuestionBankConfig,
    RotationPolicy, ServerConfig, SubstrateConfig, SubstrateProvider,
};
pub use question::{PublicQuestion, Question, QuestionKind, QuestionRecord, QuestionSet};
pub use session::{
    CompletionReason, Registration, SessionPhase, SessionReport, SessionState, FEEDBACK_THANKS,
};
