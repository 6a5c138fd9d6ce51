//! Commentary port.
//!
//! Presentation flavor shown around the interview: encouragement between
//! questions and short notes on the results page. Nothing here influences
//! scores.

use crate::domain::models::AnswerRecord;

pub trait Commentary: Send + Sync {
    /// Tip to show after `answered` answers have been recorded, if any
    fn tip(&self, answered: usize) -> Option<String>;

    /// Short note shown next to an answer in the final results
    fn answer_note(&self, record: &AnswerRecord) -> Option<String>;
}

/// Commentary that never says anything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCommentary;

impl Commentary for SilentCommentary {
    fn tip(&self, _answered: usize) -> Option<String> {
        None
    }

    fn answer_note(&self, _record: &AnswerRecord) -> Option<String> {
        None
    }
}
