//! Implementation of the `interviewer questions` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::config::Config;
use crate::domain::models::PublicQuestion;
use crate::infrastructure::question_source::load_question_bank;

#[derive(Args, Debug)]
pub struct QuestionsArgs {
    /// Question bank file (overrides question_bank.path)
    #[arg(short, long)]
    pub bank: Option<PathBuf>,

    /// Number of questions to sample (defaults to interview.question_count)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsOutput {
    pub bank_size: usize,
    pub questions: Vec<PublicQuestion>,
}

impl CommandOutput for QuestionsOutput {
    fn to_human(&self) -> String {
        format!(
            "{}\n{} of {} questions",
            TableFormatter::new().format_questions(&self.questions),
            self.questions.len(),
            self.bank_size
        )
    }
}

pub fn execute(args: QuestionsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let path = args.bank.as_ref().unwrap_or(&config.question_bank.path);
    let bank = load_question_bank(path)?;
    let set = bank.sample(args.count.unwrap_or(config.interview.question_count))?;

    output(
        &QuestionsOutput {
            bank_size: bank.len(),
            questions: set.questions,
        },
        json_mode,
    );
    Ok(())
}
