//! Implementation of the `interviewer init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::setup::{create_config_dir, create_config_file, SetupPaths};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_file: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        if self.success {
            format!("{}\nConfiguration written to {}", self.message, self.config_file.display())
        } else {
            self.message.clone()
        }
    }
}

pub fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let root = if args.path.is_absolute() {
        args.path
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };
    let paths = SetupPaths::new(&root);

    create_config_dir(&paths)?;
    let written = create_config_file(&paths, args.force)?;

    let message = match (written, args.force) {
        (false, _) => "Project already initialized. Use --force to overwrite the configuration.",
        (true, true) => "Project reinitialized successfully.",
        (true, false) => "Project initialized successfully.",
    };

    output(
        &InitOutput {
            success: written,
            message: message.to_string(),
            config_file: paths.config_file,
        },
        json_mode,
    );
    Ok(())
}
