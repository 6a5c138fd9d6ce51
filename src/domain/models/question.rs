//! Question domain models.
//!
//! A [`Question`] is the full bank record including its reference answer.
//! Everything that leaves the bank is a [`PublicQuestion`], which has no
//! field for the reference answer at all.

use serde::{Deserialize, Serialize};

use crate::domain::errors::InterviewError;

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free-text answer
    #[serde(rename = "text")]
    FreeText,
    /// Pick one of the listed options
    #[serde(rename = "mcq", alias = "multiple_choice")]
    MultipleChoice,
}

impl QuestionKind {
    /// Interpret the optional `type` tag of a bank record.
    ///
    /// Only `mcq`/`multiple_choice` select multiple choice; anything else,
    /// including a missing tag, is free text.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_lowercase()) {
            Some(t) if t == "mcq" || t == "multiple_choice" => Self::MultipleChoice,
            _ => Self::FreeText,
        }
    }

    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::FreeText => "text",
            Self::MultipleChoice => "mcq",
        }
    }
}

/// A question as held by the bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Unique question identifier
    pub id: u32,

    /// Question text shown to the candidate
    pub text: String,

    /// Answer format
    pub kind: QuestionKind,

    /// Ordered options; non-empty iff `kind` is multiple choice
    pub options: Vec<String>,

    /// Model answer. Never exposed to candidates.
    pub reference_answer: String,
}

impl Question {
    pub fn free_text(id: u32, text: impl Into<String>, reference_answer: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::FreeText,
            options: Vec::new(),
            reference_answer: reference_answer.into(),
        }
    }

    pub fn multiple_choice(
        id: u32,
        text: impl Into<String>,
        options: Vec<String>,
        reference_answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::MultipleChoice,
            options,
            reference_answer: reference_answer.into(),
        }
    }

    /// Copy of this question with the reference answer stripped
    pub fn to_public(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id,
            text: self.text.clone(),
            kind: self.kind,
            options: self.options.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), InterviewError> {
        if self.text.trim().is_empty() {
            return Err(InterviewError::InvalidQuestionBank(format!(
                "question {} has empty text",
                self.id
            )));
        }

        match self.kind {
            QuestionKind::MultipleChoice if self.options.is_empty() => {
                Err(InterviewError::InvalidQuestionBank(format!(
                    "multiple-choice question {} has no options",
                    self.id
                )))
            }
            QuestionKind::FreeText if !self.options.is_empty() => {
                Err(InterviewError::InvalidQuestionBank(format!(
                    "free-text question {} must not list options",
                    self.id
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Question record in the bank source format
///
/// ```json
/// {"id": 7, "question": "...", "type": "mcq", "options": ["A", "B"], "answer": "A"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub question: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = InterviewError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let question = Self {
            id: record.id,
            text: record.question,
            kind: QuestionKind::from_tag(record.kind.as_deref()),
            options: record.options.unwrap_or_default(),
            reference_answer: record.answer,
        };
        question.validate()?;
        Ok(question)
    }
}

/// Question as exposed to candidates and clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: u32,

    #[serde(rename = "question")]
    pub text: String,

    #[serde(rename = "type")]
    pub kind: QuestionKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Ordered per-session question set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<PublicQuestion>,
}

impl QuestionSet {
    pub const fn new(questions: Vec<PublicQuestion>) -> Self {
        Self { questions }
    }

    /// Synthetic free-text set used when the bank cannot supply a sample
    pub fn placeholder(count: usize) -> Self {
        let questions = (1..=count)
            .map(|n| PublicQuestion {
                id: u32::try_from(n).unwrap_or(u32::MAX),
                text: format!("Mock Question {n}"),
                kind: QuestionKind::FreeText,
                options: Vec::new(),
            })
            .collect();
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PublicQuestion> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PublicQuestion> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(QuestionKind::from_tag(Some("mcq")), QuestionKind::MultipleChoice);
        assert_eq!(QuestionKind::from_tag(Some("MCQ ")), QuestionKind::MultipleChoice);
        assert_eq!(
            QuestionKind::from_tag(Some("multiple_choice")),
            QuestionKind::MultipleChoice
        );
        assert_eq!(QuestionKind::from_tag(Some("text")), QuestionKind::FreeText);
        assert_eq!(QuestionKind::from_tag(Some("essay")), QuestionKind::FreeText);
        assert_eq!(QuestionKind::from_tag(None), QuestionKind::FreeText);
    }

    #[test]
    fn test_record_conversion() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 3, "question": "Which function sums a range?", "type": "mcq",
                "options": ["SUM", "COUNT"], "answer": "SUM"}"#,
        )
        .unwrap();

        let question = Question::try_from(record).unwrap();
        assert_eq!(question.id, 3);
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.options, vec!["SUM", "COUNT"]);
        assert_eq!(question.reference_answer, "SUM");
    }

    #[test]
    fn test_record_mcq_without_options_rejected() {
        let record = QuestionRecord {
            id: 1,
            question: "Pick one".to_string(),
            kind: Some("mcq".to_string()),
            options: None,
            answer: "A".to_string(),
        };
        assert!(matches!(
            Question::try_from(record),
            Err(InterviewError::InvalidQuestionBank(_))
        ));
    }

    #[test]
    fn test_public_question_has_no_answer() {
        let question = Question::free_text(9, "What does VLOOKUP do?", "Looks up a value");
        let json = serde_json::to_value(question.to_public()).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["question"], "What does VLOOKUP do?");
        assert_eq!(json["type"], "text");
        assert!(json.get("answer").is_none());
        assert!(json.get("reference_answer").is_none());
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_placeholder_set() {
        let set = QuestionSet::placeholder(5);
        assert_eq!(set.len(), 5);
        assert_eq!(set.get(0).unwrap().text, "Mock Question 1");
        assert_eq!(set.get(4).unwrap().id, 5);
    }
}
