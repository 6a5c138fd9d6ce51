//! Interviewer CLI entry point.

use clap::Parser;

use interviewer::cli::{self, commands, Cli, Commands};
use interviewer::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => cli::handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json),
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Interview(args) => commands::interview::execute(args, config, cli.json).await,
        Commands::Questions(args) => commands::questions::execute(args, &config, cli.json),
    };

    if let Err(err) = result {
        cli::handle_error(&err, cli.json);
    }
}
