//! Bounded model calls under a paused tokio clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StalledSubstrate;
use interviewer::domain::models::{SummaryEntry, FALLBACK_REMARKS, SUMMARY_UNAVAILABLE};
use interviewer::{EvaluationService, Registration, SessionState, SummaryService};
use tokio::time::Instant;

/// Slack allowed past a timeout before the fallback is returned
const OVERHEAD: Duration = Duration::from_millis(100);

#[tokio::test(start_paused = true)]
async fn test_stalled_evaluation_gives_up_at_timeout() {
    let service = EvaluationService::new(Arc::new(StalledSubstrate));

    let started = Instant::now();
    let result = service.evaluate("What does SUM do?", "Adds numbers").await;

    assert_eq!(result.score, 0);
    assert_eq!(result.remarks, FALLBACK_REMARKS);
    assert!(started.elapsed() >= EvaluationService::DEFAULT_TIMEOUT);
    assert!(started.elapsed() <= EvaluationService::DEFAULT_TIMEOUT + OVERHEAD);
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_is_honoured() {
    let service =
        EvaluationService::new(Arc::new(StalledSubstrate)).with_timeout(Duration::from_secs(3));

    let started = Instant::now();
    let err = service
        .try_evaluate("What does SUM do?", "Adds numbers")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("timed out"));
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(started.elapsed() <= Duration::from_secs(3) + OVERHEAD);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_summary_is_unavailable() {
    let service = SummaryService::new(Arc::new(StalledSubstrate));
    let answers = vec![SummaryEntry {
        question: "What does SUM do?".to_string(),
        user_answer: "Adds numbers".to_string(),
        score: 4,
    }];

    let started = Instant::now();
    let summary = service.summarize("Asha", &answers).await;

    assert_eq!(summary.strengths, SUMMARY_UNAVAILABLE);
    assert_eq!(summary.weaknesses, SUMMARY_UNAVAILABLE);
    assert_eq!(summary.suggestions, SUMMARY_UNAVAILABLE);
    assert!(started.elapsed() >= SummaryService::DEFAULT_TIMEOUT);
    assert!(started.elapsed() <= SummaryService::DEFAULT_TIMEOUT + OVERHEAD);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_model_does_not_block_interview() {
    let config = common::config(2);
    let (interviewer, _clock) = common::interviewer(&config, 5, Arc::new(StalledSubstrate));
    let controller = &interviewer.controller;

    let mut state = SessionState::new();
    controller
        .start(&mut state, &Registration::new("Asha", "IIT Madras", true))
        .unwrap();

    let started = Instant::now();
    let outcome = controller.submit(&mut state, "Adds numbers").await.unwrap();
    let timeout = Duration::from_secs(config.evaluator.timeout_secs);
    assert!(started.elapsed() >= timeout);
    assert!(started.elapsed() <= timeout + OVERHEAD);
    assert_eq!(outcome.record.score, 0);
    assert_eq!(outcome.record.remarks, FALLBACK_REMARKS);
    assert_eq!(outcome.cursor, 1);

    controller.submit(&mut state, "").await.unwrap();
    let report = controller.report(&mut state).await.unwrap();
    assert_eq!(report.total_score, 0);
    assert_eq!(report.summary.strengths, SUMMARY_UNAVAILABLE);
}
