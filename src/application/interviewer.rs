//! Wiring of the interview pipeline from configuration.
//!
//! Drivers (HTTP server, console interview) share one [`Interviewer`]: the
//! question bank, the evaluation and summary services, the session
//! controller and the commentary source.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::models::config::Config;
use crate::domain::ports::{
    Clock, Commentary, ExecutionParameters, LlmSubstrate, SilentCommentary, SystemClock,
};
use crate::infrastructure::question_source::load_question_bank;
use crate::infrastructure::substrates::build_substrate;
use crate::services::{
    EvaluationService, MotivationalTips, QuestionBank, SessionController, SummaryService,
};

#[derive(Clone)]
pub struct Interviewer {
    pub bank: Arc<QuestionBank>,
    pub evaluator: Arc<EvaluationService>,
    pub summarizer: Arc<SummaryService>,
    pub controller: Arc<SessionController>,
    pub commentary: Arc<dyn Commentary>,
    /// Size of the set served by `GET /questions`
    pub question_count: usize,
}

impl Interviewer {
    /// Load the bank and connect the configured substrate
    pub fn from_config(config: &Config) -> Result<Self> {
        let bank = match load_question_bank(&config.question_bank.path) {
            Ok(bank) => bank,
            Err(err) if config.interview.placeholder_on_bank_failure => {
                warn!(
                    error = ?err,
                    "question bank unavailable, interviews will use placeholder questions"
                );
                QuestionBank::new(Vec::new())?
            }
            Err(err) => return Err(err),
        };

        let substrate =
            build_substrate(&config.substrate).context("Failed to configure language model substrate")?;

        Ok(Self::assemble(config, bank, substrate, Arc::new(SystemClock)))
    }

    /// Build from already-constructed parts
    pub fn assemble(
        config: &Config,
        bank: QuestionBank,
        substrate: Arc<dyn LlmSubstrate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let parameters = ExecutionParameters {
            max_tokens: Some(config.substrate.max_tokens),
            temperature: Some(config.substrate.temperature),
            json_output: true,
        };

        let bank = Arc::new(bank);
        let evaluator = Arc::new(
            EvaluationService::new(Arc::clone(&substrate))
                .with_timeout(Duration::from_secs(config.evaluator.timeout_secs))
                .with_parameters(parameters.clone()),
        );
        let summarizer = Arc::new(
            SummaryService::new(substrate)
                .with_timeout(Duration::from_secs(config.evaluator.summary_timeout_secs))
                .with_parameters(parameters),
        );
        let controller = Arc::new(
            SessionController::new(
                Arc::clone(&bank),
                Arc::clone(&evaluator),
                Arc::clone(&summarizer),
                config.interview.clone(),
            )
            .with_clock(clock),
        );
        let commentary: Arc<dyn Commentary> = if config.interview.commentary {
            Arc::new(MotivationalTips::new())
        } else {
            Arc::new(SilentCommentary)
        };

        info!(
            bank_size = bank.len(),
            question_count = config.interview.question_count,
            duration_secs = config.interview.duration_secs,
            "interviewer ready"
        );

        Self {
            bank,
            evaluator,
            summarizer,
            controller,
            commentary,
            question_count: config.interview.question_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Question;
    use crate::domain::ports::{HealthStatus, SubstrateError, SubstrateRequest, SubstrateResponse};
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct Unreachable;

    #[async_trait]
    impl LlmSubstrate for Unreachable {
        fn substrate_id(&self) -> &'static str {
            "unreachable"
        }

        async fn execute(&self, _request: SubstrateRequest) -> Result<SubstrateResponse, SubstrateError> {
            Err(SubstrateError::NetworkError("connection refused".to_string()))
        }

        async fn health_check(&self) -> Result<HealthStatus, SubstrateError> {
            Ok(HealthStatus::Unavailable)
        }
    }

    #[test]
    fn test_assemble_applies_config() {
        let mut config = Config::default();
        config.interview.question_count = 3;
        config.interview.commentary = false;
        config.evaluator.timeout_secs = 4;

        let bank = QuestionBank::new(vec![Question::free_text(1, "Q", "A")]).unwrap();
        let interviewer = Interviewer::assemble(&config, bank, Arc::new(Unreachable), Arc::new(SystemClock));

        assert_eq!(interviewer.question_count, 3);
        assert_eq!(interviewer.bank.len(), 1);
        assert_eq!(interviewer.evaluator.timeout(), Duration::from_secs(4));
        assert_eq!(interviewer.commentary.tip(2), None);
    }

    #[test]
    fn test_missing_bank_falls_back_to_empty() {
        let mut config = Config::default();
        config.question_bank.path = PathBuf::from("/nonexistent/questions.json");

        let interviewer = Interviewer::from_config(&config).unwrap();
        assert!(interviewer.bank.is_empty());
    }

    #[test]
    fn test_missing_bank_fails_without_placeholders() {
        let mut config = Config::default();
        config.question_bank.path = PathBuf::from("/nonexistent/questions.json");
        config.interview.placeholder_on_bank_failure = false;

        assert!(Interviewer::from_config(&config).is_err());
    }
}
