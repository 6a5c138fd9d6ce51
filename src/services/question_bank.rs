/// Question bank: the immutable catalog every interview samples from.
///
/// The bank is built once at startup and shared read-only behind an `Arc`.
/// Sampling draws from a thread-local RNG, so concurrent sessions never
/// contend on shared random state.
use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::errors::{DomainResult, InterviewError};
use crate::domain::models::{Question, QuestionRecord, QuestionSet};

#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    /// question id -> position in `questions`
    index: HashMap<u32, usize>,
}

impl QuestionBank {
    /// Build a bank, rejecting duplicate ids and malformed questions
    pub fn new(questions: Vec<Question>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            question.validate()?;
            if index.insert(question.id, position).is_some() {
                return Err(InterviewError::InvalidQuestionBank(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }

        Ok(Self { questions, index })
    }

    /// Build a bank from source-format records
    pub fn from_records(records: Vec<QuestionRecord>) -> DomainResult<Self> {
        let questions = records
            .into_iter()
            .map(Question::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sample `n` distinct questions uniformly at random, answers stripped
    #[instrument(skip(self), fields(bank_size = self.questions.len()), err)]
    pub fn sample(&self, n: usize) -> DomainResult<QuestionSet> {
        self.sample_with_rng(n, &mut rand::thread_rng())
    }

    /// Same as [`sample`](Self::sample) with a caller-provided RNG
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> DomainResult<QuestionSet> {
        if self.questions.len() < n {
            return Err(InterviewError::InsufficientBankSize {
                requested: n,
                available: self.questions.len(),
            });
        }

        let questions = self
            .questions
            .choose_multiple(rng, n)
            .map(Question::to_public)
            .collect::<Vec<_>>();

        debug!(sampled = questions.len(), "sampled question set");
        Ok(QuestionSet::new(questions))
    }

    /// Text of the question with the given id
    pub fn lookup_text(&self, question_id: u32) -> DomainResult<&str> {
        self.index
            .get(&question_id)
            .map(|&position| self.questions[position].text.as_str())
            .ok_or(InterviewError::QuestionNotFound(question_id))
    }
}
