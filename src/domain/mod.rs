//! Domain layer for the interviewer
//!
//! This module contains the interview data model, error taxonomy and the
//! port traits that infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainResult, EvaluationError, InterviewError};
