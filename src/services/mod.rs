//! Interview services
//!
//! - `QuestionBank`: immutable catalog, sampling without replacement
//! - `EvaluationService`: grades one answer with a bounded model call
//! - `SummaryService`: aggregate strengths/weaknesses report
//! - `SessionController`: per-candidate state transitions
//! - `SessionStore`: concurrent in-memory sessions for the HTTP driver

pub mod commentary;
pub mod evaluation_service;
pub mod question_bank;
pub mod session_controller;
pub mod session_store;
pub mod summary_service;

pub use commentary::MotivationalTips;
pub use evaluation_service::EvaluationService;
pub use question_bank::QuestionBank;
pub use session_controller::{SessionController, SubmitOutcome};
pub use session_store::SessionStore;
pub use summary_service::SummaryService;

use std::time::Duration;

use crate::domain::ports::{LlmSubstrate, SubstrateRequest};
use crate::domain::EvaluationError;

/// Run one completion, giving up after `timeout`.
pub(crate) async fn complete_within(
    substrate: &dyn LlmSubstrate,
    request: SubstrateRequest,
    timeout: Duration,
) -> Result<String, EvaluationError> {
    match tokio::time::timeout(timeout, substrate.execute(request)).await {
        Ok(Ok(response)) => Ok(response.content),
        Ok(Err(err)) => Err(EvaluationError::Substrate(err)),
        Err(_) => Err(EvaluationError::Timeout(timeout)),
    }
}

/// Extract the JSON object from a model response.
///
/// Handles Markdown code fences and prose around the object.
pub fn extract_json_from_response(response: &str) -> &str {
    let mut body = response.trim();

    if let Some(fence) = body.find("```") {
        let after = &body[fence + 3..];
        if let Some(end) = after.find("```") {
            body = after[..end].trim();
        }
    }

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}
