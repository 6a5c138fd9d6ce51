//! Implementation of the `interviewer interview` command.
//!
//! Runs the whole state machine in the terminal: registration, one question
//! at a time with a live countdown, then the results table and summary.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Term};
use serde::Serialize;

use crate::application::Interviewer;
use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::domain::errors::InterviewError;
use crate::domain::models::config::Config;
use crate::domain::models::{
    PublicQuestion, QuestionKind, Registration, SessionPhase, SessionReport, SessionState,
    FEEDBACK_THANKS,
};

const RULES: [&str; 4] = [
    "Each answer is graded from 0 to 4 as soon as you submit it.",
    "You cannot go back to a previous question.",
    "A blank answer is recorded as unattempted.",
    "When the timer runs out the interview ends, answered or not.",
];

#[derive(Args, Debug)]
pub struct InterviewArgs {
    /// Question bank file (overrides question_bank.path)
    #[arg(short, long)]
    pub bank: Option<PathBuf>,

    /// Candidate name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Candidate institute (prompted when omitted)
    #[arg(long)]
    pub institute: Option<String>,

    /// Acknowledge the interview rules without prompting
    #[arg(long)]
    pub accept_rules: bool,
}

#[derive(Debug, Serialize)]
pub struct InterviewOutput {
    #[serde(flatten)]
    pub report: SessionReport,
    pub notes: Vec<String>,
}

impl CommandOutput for InterviewOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let lines = [
            style("Interview complete").bold().green().to_string(),
            format!("Candidate: {} ({})", report.candidate_name, report.institute),
            format!("Final Score: {} / {}", report.total_score, report.max_score),
            format!("Attempted: {}   Unattempted: {}", report.attempted, report.unattempted),
            String::new(),
            TableFormatter::new().format_results(&report.answers, &self.notes),
            String::new(),
            style("Strengths").bold().to_string(),
            report.summary.strengths.clone(),
            style("Weaknesses").bold().to_string(),
            report.summary.weaknesses.clone(),
            style("Suggestions").bold().to_string(),
            report.summary.suggestions.clone(),
        ];
        lines.join("\n")
    }
}

pub async fn execute(args: InterviewArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(bank) = args.bank.clone() {
        config.question_bank.path = bank;
    }
    let interviewer = Interviewer::from_config(&config)?;
    let controller = &interviewer.controller;
    let term = Term::stderr();

    term.write_line(&style("Excel Skills Interview").bold().cyan().to_string())?;
    let registration = register(&term, &args).await?;

    let mut state = SessionState::new();
    controller.start(&mut state, &registration)?;
    term.write_line(&format!(
        "\n{} questions, {} minutes. Good luck, {}!\n",
        state.total_questions(),
        config.interview.duration_secs / 60,
        state.candidate_name()
    ))?;

    while controller.tick(&mut state) == SessionPhase::InProgress {
        let question = controller.current_question(&state)?.clone();
        let remaining = controller.remaining(&state);
        term.write_line(&format!(
            "{} {}",
            style(format!("Question {}/{}", state.cursor() + 1, state.total_questions())).bold(),
            style(format!(
                "[{:02}:{:02} left]",
                remaining.num_minutes(),
                remaining.num_seconds() % 60
            ))
            .dim()
        ))?;
        term.write_line(&question.text)?;
        for (index, option) in question.options.iter().enumerate() {
            term.write_line(&format!("  {}. {option}", index + 1))?;
        }

        let input = read_line(&term, "Your answer").await?;
        let answer = resolve_answer(&question, &input);

        let spinner = create_spinner_with_message("Evaluating answer...");
        match controller.submit(&mut state, &answer).await {
            Ok(outcome) => {
                spinner.finish_success(format!(
                    "Score {}/4: {}",
                    outcome.record.score, outcome.record.remarks
                ));
                if outcome.phase == SessionPhase::InProgress {
                    if let Some(tip) = interviewer.commentary.tip(outcome.cursor) {
                        term.write_line(&style(tip).italic().yellow().to_string())?;
                    }
                }
                term.write_line("")?;
            }
            Err(InterviewError::SessionStateViolation { .. }) => {
                spinner.finish_warning("Time is up. Your answer was not recorded.");
                break;
            }
            Err(err) => {
                spinner.finish_and_clear();
                return Err(err.into());
            }
        }
    }

    let spinner = create_spinner_with_message("Preparing your results...");
    let report = controller.report(&mut state).await?;
    spinner.finish_and_clear();

    let notes = report
        .answers
        .iter()
        .filter_map(|record| interviewer.commentary.answer_note(record))
        .collect();

    output(&InterviewOutput { report, notes }, json_mode);

    if !json_mode {
        collect_feedback(&term, &interviewer, &mut state).await?;
    }
    Ok(())
}

/// Optional closing feedback; a blank line or closed input skips it
async fn collect_feedback(
    term: &Term,
    interviewer: &Interviewer,
    state: &mut SessionState,
) -> Result<()> {
    term.write_line("")?;
    let Some(feedback) = prompt_line(term, "Feedback (optional, Enter to skip)").await? else {
        return Ok(());
    };
    if feedback.is_empty() {
        return Ok(());
    }
    interviewer.controller.record_feedback(state, &feedback)?;
    term.write_line(&style(FEEDBACK_THANKS).green().to_string())?;
    Ok(())
}

async fn register(term: &Term, args: &InterviewArgs) -> Result<Registration> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => read_line(term, "Full name").await?,
    };
    let institute = match &args.institute {
        Some(institute) => institute.clone(),
        None => read_line(term, "Institute").await?,
    };

    let rules_acknowledged = if args.accept_rules {
        true
    } else {
        term.write_line(&style("\nInterview rules").bold().to_string())?;
        for rule in RULES {
            term.write_line(&format!("  - {rule}"))?;
        }
        let reply = read_line(term, "I have read the rules (y/N)").await?;
        matches!(reply.to_lowercase().as_str(), "y" | "yes")
    };

    let registration = Registration::new(name, institute, rules_acknowledged);
    registration.validate()?;
    Ok(registration)
}

/// Required input; closed stdin is an error, never a blank answer
async fn read_line(term: &Term, prompt: &str) -> Result<String> {
    match prompt_line(term, prompt).await? {
        Some(line) => Ok(line),
        None => bail!("Input closed at \"{prompt}\"; the interview was abandoned"),
    }
}

/// Read one line without blocking the runtime
async fn prompt_line(term: &Term, prompt: &str) -> Result<Option<String>> {
    term.write_str(&format!("{} ", style(format!("{prompt}:")).bold()))?;
    tokio::task::spawn_blocking(|| read_trimmed(&mut std::io::stdin().lock()))
        .await
        .context("Input reader stopped")?
        .context("Failed to read input")
}

/// Next trimmed line, or `None` at end of input
fn read_trimmed(reader: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Map an option number to its text for multiple-choice questions
fn resolve_answer(question: &PublicQuestion, input: &str) -> String {
    if question.kind != QuestionKind::MultipleChoice {
        return input.to_string();
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| question.options.get(index))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}
