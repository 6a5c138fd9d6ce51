//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::init::InitArgs;
use super::commands::interview::InterviewArgs;
use super::commands::questions::QuestionsArgs;
use super::commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "interviewer")]
#[command(about = "Interviewer - timed interviews with language-model grading", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of .interviewer/config.yaml
    #[arg(short, long, global = true, env = "INTERVIEWER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default .interviewer/config.yaml
    Init(InitArgs),

    /// Run the HTTP service
    Serve(ServeArgs),

    /// Take an interview in the terminal
    Interview(InterviewArgs),

    /// Sample and print a question set
    Questions(QuestionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["interviewer", "questions", "--json", "--config", "alt.yaml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(matches!(cli.command, Commands::Questions(_)));
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["interviewer", "serve", "--port", "9000", "--host", "0.0.0.0"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert!(args.bank.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_interview_arguments() {
        let cli = Cli::try_parse_from([
            "interviewer",
            "interview",
            "--name",
            "Asha",
            "--institute",
            "IIT Madras",
            "--accept-rules",
        ])
        .unwrap();
        match cli.command {
            Commands::Interview(args) => {
                assert_eq!(args.name.as_deref(), Some("Asha"));
                assert_eq!(args.institute.as_deref(), Some("IIT Madras"));
                assert!(args.accept_rules);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["interviewer", "grade"]).is_err());
    }
}
