//! Common test utilities for integration tests
//!
//! Provides shared fixtures and scripted language-model substrates.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use interviewer::domain::ports::{
    HealthStatus, LlmSubstrate, SubstrateError, SubstrateRequest, SubstrateResponse,
};
use interviewer::{Config, Interviewer, ManualClock, Question, QuestionBank};

pub const SUMMARY_JSON: &str = r#"{"strengths": "Solid formula knowledge", "weaknesses": "Charts", "suggestions": "Practice pivot tables"}"#;

/// Bank of `size` free-text questions with ids 1..=size
pub fn bank(size: u32) -> QuestionBank {
    let questions = (1..=size)
        .map(|id| {
            Question::free_text(
                id,
                format!("Excel question {id}"),
                format!("Reference answer {id}"),
            )
        })
        .collect();
    QuestionBank::new(questions).expect("fixture bank is valid")
}

pub fn config(question_count: usize) -> Config {
    let mut config = Config::default();
    config.interview.question_count = question_count;
    config.interview.commentary = false;
    config
}

/// Interviewer over a fixture bank with a manual clock
pub fn interviewer(
    config: &Config,
    bank_size: u32,
    substrate: Arc<dyn LlmSubstrate>,
) -> (Interviewer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let interviewer = Interviewer::assemble(config, bank(bank_size), substrate, clock.clone());
    (interviewer, clock)
}

fn reply(content: impl Into<String>) -> Result<SubstrateResponse, SubstrateError> {
    Ok(SubstrateResponse {
        content: content.into(),
        model: "scripted".to_string(),
        usage: None,
    })
}

fn is_summary(request: &SubstrateRequest) -> bool {
    request.prompt.contains("Analyze the candidate's answers")
}

/// Grades every answer with a fixed score; blank answers get 0
pub struct ScriptedSubstrate {
    score: i64,
    calls: AtomicUsize,
}

impl ScriptedSubstrate {
    pub fn scoring(score: i64) -> Arc<Self> {
        Arc::new(Self {
            score,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmSubstrate for ScriptedSubstrate {
    fn substrate_id(&self) -> &'static str {
        "scripted"
    }

    async fn execute(&self, request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if is_summary(&request) {
            return reply(SUMMARY_JSON);
        }
        if request.prompt.contains("Candidate Answer: \n") {
            return reply(r#"{"score": 0, "remarks": "No answer was provided."}"#);
        }
        reply(format!(
            r#"{{"score": {}, "remarks": "Graded by script"}}"#,
            self.score
        ))
    }

    async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
        Ok(HealthStatus::Healthy)
    }
}

/// Never answers
pub struct StalledSubstrate;

#[async_trait]
impl LlmSubstrate for StalledSubstrate {
    fn substrate_id(&self) -> &'static str {
        "stalled"
    }

    async fn execute(&self, _request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
        std::future::pending().await
    }

    async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
        Ok(HealthStatus::Unavailable)
    }
}

/// Fails every call
pub struct FailingSubstrate;

#[async_trait]
impl LlmSubstrate for FailingSubstrate {
    fn substrate_id(&self) -> &'static str {
        "failing"
    }

    async fn execute(&self, _request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
        Err(SubstrateError::NetworkError("connection refused".to_string()))
    }

    async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
        Ok(HealthStatus::Unavailable)
    }
}
