//! Implementation of the `interviewer serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::application::Interviewer;
use crate::domain::models::config::Config;
use crate::infrastructure::http::{serve, AppState};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Question bank file (overrides question_bank.path)
    #[arg(short, long)]
    pub bank: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(bank) = self.bank {
            config.question_bank.path = bank;
        }
    }
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    args.apply(&mut config);

    let interviewer = Interviewer::from_config(&config)?;
    let state = Arc::new(AppState::new(interviewer));
    serve(state, &config.server).await
}
