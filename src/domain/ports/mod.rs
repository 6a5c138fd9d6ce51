//! Port trait definitions (Hexagonal Architecture)
//!
//! Interfaces that infrastructure adapters implement:
//! - LlmSubstrate: language-model completion backend
//! - Clock: source of wall-clock time for deadlines
//! - Commentary: presentation flavor around the interview

pub mod clock;
pub mod commentary;
pub mod llm_substrate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use commentary::{Commentary, SilentCommentary};
pub use llm_substrate::{
    ExecutionParameters, HealthStatus, LlmSubstrate, SubstrateError, SubstrateRequest,
    SubstrateResponse, TokenUsage,
};
