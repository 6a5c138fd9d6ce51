//! Table output formatting for CLI commands
//!
//! Question listings and interview results rendered with comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::truncate;
use crate::domain::models::{AnswerRecord, PublicQuestion, QuestionKind, MAX_SCORE};

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a sampled question set
    pub fn format_questions(&self, questions: &[PublicQuestion]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("#"),
            header("ID"),
            header("Type"),
            header("Question"),
            header("Options"),
        ]);

        for (position, question) in questions.iter().enumerate() {
            let kind = match question.kind {
                QuestionKind::FreeText => "text",
                QuestionKind::MultipleChoice => "choice",
            };
            table.add_row(vec![
                Cell::new(position + 1).set_alignment(CellAlignment::Right),
                Cell::new(question.id),
                Cell::new(kind),
                Cell::new(truncate(&question.text, 70)),
                Cell::new(question.options.join(" / ")),
            ]);
        }

        table.to_string()
    }

    /// Format per-answer results, with an optional note per row
    pub fn format_results(&self, answers: &[AnswerRecord], notes: &[String]) -> String {
        let mut table = self.create_base_table();
        let mut columns = vec![
            header("#"),
            header("Question"),
            header("Your answer"),
            header("Score"),
            header("Remarks"),
        ];
        if !notes.is_empty() {
            columns.push(header("Note"));
        }
        table.set_header(columns);

        for (position, record) in answers.iter().enumerate() {
            let answer = if record.is_attempted() {
                Cell::new(truncate(&record.submitted_text, 40))
            } else if self.use_colors {
                Cell::new("(no answer)").fg(Color::DarkGrey)
            } else {
                Cell::new("(no answer)")
            };

            let score = format!("{}/{MAX_SCORE}", record.score);
            let score = if self.use_colors {
                Cell::new(score).fg(score_color(record.score))
            } else {
                Cell::new(score)
            };

            let mut row = vec![
                Cell::new(position + 1).set_alignment(CellAlignment::Right),
                Cell::new(truncate(&record.question_text, 50)),
                answer,
                score.set_alignment(CellAlignment::Center),
                Cell::new(&record.remarks),
            ];
            if let Some(note) = notes.get(position) {
                row.push(Cell::new(note));
            }
            table.add_row(row);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

const fn score_color(score: u8) -> Color {
    match score {
        4 => Color::Green,
        2 | 3 => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::EvaluationResult;

    fn formatter() -> TableFormatter {
        TableFormatter::with_config(false, Some(160))
    }

    #[test]
    fn test_format_questions() {
        let questions = vec![PublicQuestion {
            id: 7,
            text: "Which function adds values?".to_string(),
            kind: QuestionKind::MultipleChoice,
            options: vec!["SUM".to_string(), "COUNT".to_string()],
        }];

        let rendered = formatter().format_questions(&questions);
        assert!(rendered.contains("Which function adds values?"));
        assert!(rendered.contains("SUM / COUNT"));
        assert!(rendered.contains("choice"));
    }

    #[test]
    fn test_format_results_marks_blank_answers() {
        let answers = vec![
            AnswerRecord::new(1, "Q1", "Adds numbers", EvaluationResult::new(4, "Correct")),
            AnswerRecord::new(2, "Q2", "", EvaluationResult::new(0, "No answer")),
        ];

        let rendered = formatter().format_results(&answers, &[]);
        assert!(rendered.contains("4/4"));
        assert!(rendered.contains("0/4"));
        assert!(rendered.contains("(no answer)"));
        assert!(!rendered.contains("Note"));
    }

    #[test]
    fn test_format_results_with_notes() {
        let answers = vec![AnswerRecord::new(1, "Q1", "A", EvaluationResult::new(2, "Partly"))];
        let notes = vec!["Strength - Clear | Weakness - Brief".to_string()];

        let rendered = formatter().format_results(&answers, &notes);
        assert!(rendered.contains("Note"));
        assert!(rendered.contains("Strength - Clear"));
    }
}
